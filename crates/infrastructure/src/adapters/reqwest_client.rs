//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port. Each call sends exactly one
//! request, with no retry and no caching.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use probe_application::DEFAULT_TIMEOUT_MS;
use probe_application::ports::{HttpClient, HttpClientError};
use probe_domain::request::{HttpMethod, RequestSpec};
use probe_domain::response::ResponseSpec;
use reqwest::{Client, Method, Url};
use tracing::trace;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "probe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("probe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let detail = format!("{error:?}").to_lowercase();
            if detail.contains("dns") || detail.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if detail.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        let method = request.method;
        let url = request.url.clone();
        let headers: Vec<_> = request.headers.iter().cloned().collect();
        let body = request.body.clone();
        let timeout_ms = request.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url)
                .timeout(Duration::from_millis(timeout_ms));

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }

            // Content-Type from the body unless a header already sets one
            if let Some(content_type) = body.content_type()
                && !headers
                    .iter()
                    .any(|h| h.name.eq_ignore_ascii_case("content-type"))
            {
                builder = builder.header("Content-Type", content_type);
            }

            if !body.is_empty() {
                let bytes = body
                    .to_bytes()
                    .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
                builder = builder.body(bytes);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?
                .to_vec();
            let duration = start.elapsed();

            trace!(%method, %url, status, bytes = body_bytes.len(), "Response body read");

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        let pairs = [
            (HttpMethod::Get, Method::GET),
            (HttpMethod::Post, Method::POST),
            (HttpMethod::Put, Method::PUT),
            (HttpMethod::Patch, Method::PATCH),
            (HttpMethod::Delete, Method::DELETE),
        ];
        for (method, expected) in pairs {
            assert_eq!(ReqwestHttpClient::to_reqwest_method(method), expected);
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_url_is_rejected_before_sending() {
        let client = ReqwestHttpClient::new().unwrap();
        let request = RequestSpec::get("http://exa mple.com/objects");

        let result = client.execute(&request).await;

        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
