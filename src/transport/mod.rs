//! HTTP transport layer for the SMA client.
//!
//! Issues one HTTP request at a time and classifies the outcome: non-200
//! statuses become protocol errors carrying status code and raw body, JSON
//! bodies are parsed, and non-JSON bodies (attachment downloads) pass
//! through as raw bytes.

use crate::errors::{NetworkError, ResponseError, SmaError, SmaResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use http::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a single request and classify the response
    async fn execute(&self, request: HttpRequest) -> SmaResult<ApiResponse>;
}

/// Fully-resolved request handed to the transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

/// Endpoint-relative request descriptor built by the service layer.
///
/// Cloneable so the orchestrator can replay the identical request once
/// after a credential refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path relative to the configured base URL
    pub endpoint: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a new GET request
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Create a new POST request
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Create a new DELETE request
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a batch of query parameters
    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set the JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolve into a transport request with the given URL and headers
    pub fn into_http(self, url: String, headers: HeaderMap) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url,
            headers,
            query: self.query,
            body: self.body,
        }
    }
}

/// Classified response payload
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// Parsed JSON body
    Json(Value),
    /// Raw non-JSON body, used for attachment downloads
    Binary(BinaryPayload),
}

impl ApiResponse {
    /// Unwrap the JSON payload, failing on binary responses
    pub fn into_json(self) -> SmaResult<Value> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Binary(_) => Err(ResponseError::UnexpectedShape {
                message: "expected a JSON response, got a binary payload".to_string(),
            }
            .into()),
        }
    }

    /// Unwrap the binary payload, failing on JSON responses
    pub fn into_binary(self) -> SmaResult<BinaryPayload> {
        match self {
            ApiResponse::Binary(payload) => Ok(payload),
            ApiResponse::Json(_) => Err(ResponseError::UnexpectedShape {
                message: "expected a binary response, got JSON".to_string(),
            }
            .into()),
        }
    }
}

/// Raw response body plus the headers needed to interpret it
#[derive(Debug, Clone)]
pub struct BinaryPayload {
    /// Response body bytes
    pub bytes: Bytes,
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Content-Disposition header value, if present
    pub content_disposition: Option<String>,
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport honoring the TLS-verification flag and
    /// request timeout
    pub fn new(verify_tls: bool, timeout: Duration) -> SmaResult<Self> {
        let mut builder = reqwest::ClientBuilder::new().timeout(timeout);
        if !verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| SmaError::Network(NetworkError::Http(e.to_string())))?;
        Ok(Self { client })
    }

    /// Create a transport around a pre-built client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> SmaResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SmaError::Network(NetworkError::from(e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SmaError::Network(NetworkError::from(e)))?;

        if status.as_u16() != 200 {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            debug!(status = status.as_u16(), "request failed");
            return Err(SmaError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);

        if is_json {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            let value: Value = serde_json::from_str(&body)
                .map_err(|_| ResponseError::InvalidJson { body })?;
            Ok(ApiResponse::Json(value))
        } else {
            Ok(ApiResponse::Binary(BinaryPayload {
                bytes,
                content_type,
                content_disposition,
            }))
        }
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish()
    }
}
