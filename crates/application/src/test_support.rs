//! Scripted `HttpClient` for unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use parking_lot::Mutex;
use probe_domain::request::RequestSpec;
use probe_domain::response::ResponseSpec;
use serde_json::Value;

use crate::ports::{HttpClient, HttpClientError};

/// Replays queued results in order and records every request it receives.
#[derive(Default)]
pub struct MockHttpClient {
    replies: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(self, status: u16, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.reply(ResponseSpec::new(
            status,
            headers,
            body.to_string().into_bytes(),
            Duration::from_millis(5),
        ))
    }

    pub fn reply_text(self, status: u16, body: &str) -> Self {
        self.reply(ResponseSpec::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(5),
        ))
    }

    pub fn reply(self, response: ResponseSpec) -> Self {
        self.replies.lock().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: HttpClientError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        self.requests.lock().push(request.clone());
        let result = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(HttpClientError::Other("no scripted reply".to_string())));
        Box::pin(async move { result })
    }
}
