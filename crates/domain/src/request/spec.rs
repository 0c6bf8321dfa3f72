//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, RequestBody};

/// Complete description of one HTTP request, not yet executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL; absolute, or a path starting with `/` resolved against a base URL
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Per-request timeout; `None` defers to the harness default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestSpec {
    /// Creates a request with the given method and URL and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::none(),
            timeout_ms: None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Returns true if the URL is a path relative to a base URL.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.url.starts_with('/')
    }

    /// Returns the URL to send to, joining relative paths onto `base_url`.
    #[must_use]
    pub fn full_url(&self, base_url: Option<&str>) -> String {
        match base_url {
            Some(base) if self.is_relative() => {
                format!("{}{}", base.trim_end_matches('/'), self.url)
            }
            _ => self.url.clone(),
        }
    }

    /// Returns the effective timeout, falling back to `default_ms`.
    #[must_use]
    pub fn effective_timeout_ms(&self, default_ms: u64) -> u64 {
        self.timeout_ms.unwrap_or(default_ms)
    }

}
