//! HTTP transport for the controller's `rr_` endpoints.
//!
//! The transport only moves bytes: it issues one request and hands back the
//! status, declared content type, and body. Only connection failures and
//! timeouts are errors here; every response that arrives is handed on.
//! Decoding happens in [`crate::reply`], so the policy can be exercised
//! without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use rrf_core::config::ControllerConfig;
use rrf_core::error::{RrfError, RrfResult};

/// HTTP method used by the controller interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A single request against the controller.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL, without query string.
    pub url: String,
    /// Query parameters (both methods).
    pub params: Vec<(String, String)>,
    /// Raw request body, POST only.
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            params: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Look up a query parameter by name.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Endpoint path of the URL, e.g. `/rr_gcode`.
    pub fn endpoint(&self) -> &str {
        match self.url.rfind('/') {
            Some(idx) => &self.url[idx..],
            None => &self.url,
        }
    }
}

/// Undecoded response from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Value of the `content-type` header, if present.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// A 200 response with a plain-text body.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/plain".to_string()),
            body: body.into().into_bytes(),
        }
    }

    /// A 200 response labelled `application/json`.
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: Some(rrf_core::constants::JSON_CONTENT_TYPE.to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    /// A 200 response carrying arbitrary bytes.
    pub fn bytes(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some("application/octet-stream".to_string()),
            body,
        }
    }
}

/// Something that can carry a [`Request`] to the controller.
///
/// Implementations must not retry: a failed send surfaces to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> RrfResult<RawResponse>;
}

/// Production transport over a pooled reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build the pooled HTTP client from controller configuration.
    pub fn new(config: &ControllerConfig) -> RrfResult<Self> {
        let inner = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            // The firmware serves few concurrent sockets; keep the pool small.
            .pool_max_idle_per_host(1)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| RrfError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Classify a reqwest error into an RrfError variant.
    fn classify_error(e: reqwest::Error) -> RrfError {
        if e.is_timeout() {
            RrfError::Timeout(e.to_string())
        } else if e.is_connect() {
            RrfError::Http(format!("connection failed: {e}"))
        } else {
            RrfError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> RrfResult<RawResponse> {
        debug!("{} {}", request.method, request.url);

        let builder = match request.method {
            Method::Get => self.inner.get(&request.url),
            Method::Post => self.inner.post(&request.url),
        };
        let builder = builder.query(&request.params);
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await.map_err(Self::classify_error)?;

        // Non-2xx bodies are handed on too; the firmware reports errors as JSON.
        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned {status}", request.method, request.url);
        }
        let status = status.as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| RrfError::Http(format!("failed to read response body: {e}")))?
            .to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
