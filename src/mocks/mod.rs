//! Mock implementations for testing.
//!
//! Provides a recording transport so the credential, orchestrator and
//! service layers can be exercised without a network.

use crate::errors::SmaResult;
use crate::transport::{ApiResponse, BinaryPayload, HttpRequest, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Scripted transport: returns queued outcomes in order and records every
/// request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<SmaResult<ApiResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response
    pub fn enqueue_json(&self, value: Value) {
        self.responses
            .lock()
            .push_back(Ok(ApiResponse::Json(value)));
    }

    /// Queue a successful binary response
    pub fn enqueue_binary(
        &self,
        bytes: impl Into<Bytes>,
        content_type: Option<&str>,
        content_disposition: Option<&str>,
    ) {
        self.responses
            .lock()
            .push_back(Ok(ApiResponse::Binary(BinaryPayload {
                bytes: bytes.into(),
                content_type: content_type.map(str::to_string),
                content_disposition: content_disposition.map(str::to_string),
            })));
    }

    /// Queue a failure
    pub fn enqueue_error(&self, error: crate::errors::SmaError) {
        self.responses.lock().push_back(Err(error));
    }

    /// All requests recorded so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests recorded so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> SmaResult<ApiResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .expect("MockTransport response queue is empty")
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued", &self.responses.lock().len())
            .field("recorded", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let transport = MockTransport::new();
        transport.enqueue_json(json!({"first": true}));
        transport.enqueue_json(json!({"second": true}));

        let request = HttpRequest {
            method: http::Method::GET,
            url: "https://sma.example.com/x".to_string(),
            headers: http::HeaderMap::new(),
            query: Vec::new(),
            body: None,
        };

        let first = transport.execute(request.clone()).await.unwrap();
        assert_eq!(first.into_json().unwrap()["first"], json!(true));
        let second = transport.execute(request).await.unwrap();
        assert_eq!(second.into_json().unwrap()["second"], json!(true));
        assert_eq!(transport.request_count(), 2);
    }
}
