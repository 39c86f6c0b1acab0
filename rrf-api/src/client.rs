//! Connection to a single controller.
//!
//! `RrfClient` owns the transport session and the timing policy (poll
//! throttle, reply timeout). It is built once and reused for every call;
//! clones share the underlying HTTP connection pool.

use std::time::Duration;

use chrono::Local;
use tracing::debug;

use rrf_core::config::ControllerConfig;
use rrf_core::error::RrfResult;

use crate::reply::{self, Reply};
use crate::transport::{HttpTransport, RawResponse, Request, Transport};

/// Client for the controller's `rr_` HTTP interface.
#[derive(Clone)]
pub struct RrfClient<T = HttpTransport> {
    transport: T,
    /// Base URL, e.g. "http://192.168.1.50".
    base_url: String,
    /// Spacing between reply polls and between model sub-queries.
    throttle: Duration,
    /// How long a synchronous command waits for a reply.
    reply_timeout: Duration,
}

impl RrfClient<HttpTransport> {
    /// Create a client over HTTP from controller configuration.
    pub fn new(config: &ControllerConfig) -> RrfResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> RrfClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, config: &ControllerConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url(),
            throttle: config.throttle(),
            reply_timeout: config.reply_timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    pub fn reply_timeout(&self) -> Duration {
        self.reply_timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Override the poll/sub-query spacing.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Override the reply timeout.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Build the full URL for an endpoint path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return the undecoded response.
    pub(crate) async fn send_raw(&self, request: Request) -> RrfResult<RawResponse> {
        self.transport.send(request).await
    }

    /// Send a request and decode the body as JSON or text.
    pub(crate) async fn send(&self, request: Request) -> RrfResult<Reply> {
        let url = request.url.clone();
        let raw = self.transport.send(request).await?;
        let decoded = reply::decode(&raw)?;
        debug!("{}", log_line(&url, &Local::now().to_rfc3339(), &decoded));
        Ok(decoded)
    }

    /// GET an endpoint with query parameters and decode the reply.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> RrfResult<Reply> {
        let mut request = Request::get(self.url(path));
        for (key, value) in params {
            request = request.param(key, *value);
        }
        self.send(request).await
    }
}

/// Debug log entry for a decoded call: URL, wall-clock time, payload.
fn log_line(url: &str, at: &str, decoded: &Reply) -> String {
    match decoded {
        Reply::Structured(value) => format!("{url} {at}: JSON: {value}"),
        Reply::Text(text) => format!("{url} {at}: Text: {text:?}"),
    }
}
