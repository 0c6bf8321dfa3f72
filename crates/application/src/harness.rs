//! Spec executor.
//!
//! Sends the request of a [`Spec`] once, checks its expectations in order and
//! hands back the `returns` value.

use std::sync::Arc;

use probe_domain::request::RequestSpec;
use probe_domain::response::ResponseSpec;
use probe_domain::{ExpectationRunner, JsonPath, Spec};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::error::{AssertionFailure, StepError, StepResult};
use crate::ports::{HttpClient, HttpClientError};

/// What a successfully executed spec produced.
#[derive(Debug, Clone)]
pub struct SpecOutcome {
    /// The response the expectations were checked against.
    pub response: ResponseSpec,
    /// Value at the spec's `returns` path, if it declared one.
    pub returned: Option<Value>,
}

impl SpecOutcome {
    /// Takes the returned value.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Extraction` if the spec declared no `returns` path.
    pub fn into_returned(self) -> StepResult<Value> {
        self.returned
            .ok_or_else(|| StepError::extraction("<none>", "spec declares no returns path"))
    }
}

/// Executes specs through an `HttpClient`.
///
/// # Example
///
/// ```ignore
/// let harness = Harness::new(Arc::new(ReqwestHttpClient::new()?), HarnessConfig::default());
///
/// let created = spec()
///     .post("https://api.restful-api.dev/objects")
///     .with_json(json!({"name": "Apple MacBook Pro 16"}))
///     .expect_status(200)
///     .returns("id")
///     .build()?;
/// let id = harness.execute(&created).await?.into_returned()?;
/// ```
pub struct Harness<C: HttpClient> {
    client: Arc<C>,
    config: HarnessConfig,
    runner: ExpectationRunner,
}

impl<C: HttpClient> Harness<C> {
    /// Creates a harness over the given client.
    pub const fn new(client: Arc<C>, config: HarnessConfig) -> Self {
        Self {
            client,
            config,
            runner: ExpectationRunner::new(),
        }
    }

    /// Executes a spec: one request, then expectations, then `returns`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the URL is empty or not http(s); nothing is sent.
    /// - `Network` if the request could not be completed.
    /// - `Assertion` for the first expectation that does not hold.
    /// - `Extraction` if the `returns` path cannot be resolved.
    pub async fn execute(&self, spec: &Spec) -> StepResult<SpecOutcome> {
        let request = self.prepare(&spec.request)?;

        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self
            .client
            .execute(&request)
            .await
            .map_err(|e| {
                warn!(method = %request.method, url = %request.url, error = %e, "Request failed");
                match e {
                    HttpClientError::InvalidUrl(msg) | HttpClientError::InvalidBody(msg) => {
                        StepError::InvalidRequest(msg)
                    }
                    other => StepError::Network(other),
                }
            })?;
        debug!(
            status = response.status,
            duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            size = response.size,
            "Response received"
        );

        if let Some(failure) = self.runner.run(&spec.expectations, &response).into_failure() {
            return Err(AssertionFailure::from(failure).into());
        }

        let returned = spec
            .returns
            .as_ref()
            .map(|path| extract(path, &response))
            .transpose()?;

        Ok(SpecOutcome { response, returned })
    }

    /// Validates the request and resolves its URL and timeout.
    fn prepare(&self, request: &RequestSpec) -> StepResult<RequestSpec> {
        if request.url.trim().is_empty() {
            return Err(StepError::InvalidRequest("URL is required".to_string()));
        }
        if request.is_relative() && self.config.base_url.is_none() {
            return Err(StepError::InvalidRequest(format!(
                "relative URL '{}' needs a base URL",
                request.url
            )));
        }

        let url = request.full_url(self.config.base_url.as_deref());
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StepError::InvalidRequest(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(RequestSpec {
            url,
            timeout_ms: Some(request.effective_timeout_ms(self.config.default_timeout_ms)),
            ..request.clone()
        })
    }
}

/// Reads the value at `path` from the parsed JSON body of `response`.
///
/// # Errors
///
/// Returns `StepError::Extraction` if the body is not JSON or the path does
/// not resolve.
pub fn extract(path: &JsonPath, response: &ResponseSpec) -> StepResult<Value> {
    let json = response
        .json()
        .ok_or_else(|| StepError::extraction(path.as_str(), "response body is not JSON"))?;
    path.resolve(json)
        .cloned()
        .ok_or_else(|| StepError::extraction(path.as_str(), "path did not resolve"))
}
