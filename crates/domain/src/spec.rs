//! Contract specs and the fluent spec builder.
//!
//! Building a spec is pure configuration: nothing is sent until the built
//! [`Spec`] is handed to an executor.
//!
//! ```
//! use probe_domain::spec;
//! use serde_json::json;
//!
//! let create = spec()
//!     .post("https://api.restful-api.dev/objects")
//!     .with_json(json!({"name": "Apple MacBook Pro 16"}))
//!     .expect_status(200)
//!     .returns("id")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(create.expectations.len(), 1);
//! assert_eq!(create.returns.map(|p| p.to_string()), Some("id".to_string()));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::json::JsonPath;
use crate::request::{Header, Headers, HttpMethod, RequestBody, RequestSpec};
use crate::testing::{Expectation, StatusExpectation};

/// A fully configured, not-yet-executed contract step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// The request to send.
    pub request: RequestSpec,
    /// Expectations evaluated in order against the response.
    #[serde(default)]
    pub expectations: Vec<Expectation>,
    /// Path of the value handed back to the caller after the expectations hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<JsonPath>,
}

impl Spec {
    /// Returns a short label such as `GET https://host/objects`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.request.method, self.request.url)
    }
}

/// Returns a fresh spec builder.
#[must_use]
pub fn spec() -> SpecBuilder {
    SpecBuilder::default()
}

/// Incremental builder for a [`Spec`].
///
/// Invalid inputs (a malformed `returns` path, an invalid regex) are
/// remembered and reported by [`SpecBuilder::build`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SpecBuilder {
    method: HttpMethod,
    url: Option<String>,
    headers: Headers,
    body: RequestBody,
    timeout_ms: Option<u64>,
    expectations: Vec<Expectation>,
    returns: Option<JsonPath>,
    error: Option<DomainError>,
}

impl SpecBuilder {
    /// Targets `url` with the given method.
    pub fn request(mut self, method: HttpMethod, url: impl Into<String>) -> Self {
        self.method = method;
        self.url = Some(url.into());
        self
    }

    /// Targets `url` with GET.
    pub fn get(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Get, url)
    }

    /// Targets `url` with POST.
    pub fn post(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Post, url)
    }

    /// Targets `url` with PUT.
    pub fn put(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Put, url)
    }

    /// Targets `url` with PATCH.
    pub fn patch(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Patch, url)
    }

    /// Targets `url` with DELETE.
    pub fn delete(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Delete, url)
    }

    /// Sends `body` as JSON.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::json(body);
        self
    }

    /// Sends a raw text body with the given content type.
    pub fn with_body(mut self, content_type: impl Into<String>, content: impl Into<String>) -> Self {
        self.body = RequestBody::Text {
            content_type: content_type.into(),
            content: content.into(),
        };
        self
    }

    /// Adds one header, replacing an earlier header of the same name.
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_headers([Header::new(name, value)])
    }

    /// Adds several headers.
    ///
    /// Names that are not valid HTTP tokens are reported by `build`.
    pub fn with_headers<I, H>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<Header>,
    {
        for header in headers {
            let header = header.into();
            if is_token(&header.name) {
                self.headers.set(header);
            } else {
                self.error
                    .get_or_insert(DomainError::InvalidHeaderName(header.name));
            }
        }
        self
    }

    /// Overrides the harness default timeout for this request.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Expects exactly this status code.
    pub fn expect_status(self, code: u16) -> Self {
        self.expect_status_in(StatusExpectation::exact(code))
    }

    /// Expects a status code matching `expected`.
    pub fn expect_status_in(self, expected: StatusExpectation) -> Self {
        self.expect(Expectation::StatusCode { expected })
    }

    /// Expects the JSON body to structurally contain `expected`.
    pub fn expect_json_like(self, expected: Value) -> Self {
        self.expect(Expectation::JsonLike { expected })
    }

    /// Expects the value at `path` to structurally contain `expected`.
    pub fn expect_json_like_at(mut self, path: &str, expected: Value) -> Self {
        match JsonPath::parse(path) {
            Ok(path) => self.expect(Expectation::JsonLikeAt { path, expected }),
            Err(e) => {
                self.error.get_or_insert(e);
                self
            }
        }
    }

    /// Expects the JSON body to equal `expected` exactly.
    pub fn expect_json(self, expected: Value) -> Self {
        self.expect(Expectation::JsonEquals { expected })
    }

    /// Expects the raw body to contain `text`.
    pub fn expect_body_contains(self, text: impl Into<String>) -> Self {
        self.expect(Expectation::BodyContains {
            text: text.into(),
            ignore_case: false,
        })
    }

    /// Expects the raw body to match the regex `pattern`.
    pub fn expect_body_matches(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if let Err(e) = Regex::new(&pattern) {
            self.error.get_or_insert(DomainError::InvalidPattern {
                pattern,
                reason: e.to_string(),
            });
            return self;
        }
        self.expect(Expectation::BodyMatches { pattern })
    }

    /// Expects header `name` to be present with exactly `value`.
    pub fn expect_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.expect(Expectation::Header {
            name: name.into(),
            value: Some(value.into()),
        })
    }

    /// Expects header `name` to be present.
    pub fn expect_header_exists(self, name: impl Into<String>) -> Self {
        self.expect(Expectation::Header {
            name: name.into(),
            value: None,
        })
    }

    /// Expects the response to arrive within `max_ms`.
    pub fn expect_response_time(self, max_ms: u64) -> Self {
        self.expect(Expectation::ResponseTime { max_ms })
    }

    /// Appends an arbitrary expectation.
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Hands the value at `path` back to the caller after execution.
    pub fn returns(mut self, path: &str) -> Self {
        match JsonPath::parse(path) {
            Ok(path) => self.returns = Some(path),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Finishes configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid input recorded while building, or
    /// `DomainError::MissingTarget` if no method/URL was chosen.
    pub fn build(self) -> DomainResult<Spec> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let url = self.url.ok_or(DomainError::MissingTarget)?;

        Ok(Spec {
            request: RequestSpec {
                method: self.method,
                url,
                headers: self.headers,
                body: self.body,
                timeout_ms: self.timeout_ms,
            },
            expectations: self.expectations,
            returns: self.returns,
        })
    }
}

/// RFC 9110 token: non-empty, visible ASCII without separators.
fn is_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
