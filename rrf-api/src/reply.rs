//! Decoded controller replies.
//!
//! The firmware labels some JSON bodies (notably `M409` output) as
//! `text/plain`, so a body is treated as JSON when either the header says
//! so or the text starts with `{`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use rrf_core::constants::JSON_CONTENT_TYPE;
use rrf_core::error::{RrfError, RrfResult};

use crate::transport::RawResponse;

/// A reply from the controller: either opaque text or decoded JSON.
///
/// Empty text means "no reply yet" on the `rr_reply` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Structured(serde_json::Value),
}

impl Reply {
    /// The empty reply.
    pub fn empty() -> Self {
        Reply::Text(String::new())
    }

    /// Whether this is an empty text reply.
    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Text(text) if text.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            Reply::Text(_) => None,
            Reply::Structured(value) => Some(value),
        }
    }

    /// Look up a top-level key of a structured reply.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.as_structured().and_then(|v| v.get(key))
    }

    /// Deserialize a structured reply into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> RrfResult<T> {
        match self {
            Reply::Structured(value) => Ok(T::deserialize(value)?),
            Reply::Text(text) => Err(RrfError::Protocol(format!(
                "expected a JSON reply, got text: {text:?}"
            ))),
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Text(text) => f.write_str(text),
            Reply::Structured(value) => write!(f, "{value}"),
        }
    }
}

/// Whether a response should be parsed as JSON.
pub fn is_json(content_type: Option<&str>, body: &str) -> bool {
    content_type == Some(JSON_CONTENT_TYPE) || body.starts_with('{')
}

/// Decode a raw response into a [`Reply`].
///
/// Fails with [`RrfError::Decode`] when the body is signalled as JSON but
/// does not parse.
pub fn decode(response: &RawResponse) -> RrfResult<Reply> {
    let body = String::from_utf8_lossy(&response.body);

    if is_json(response.content_type.as_deref(), &body) {
        let value = serde_json::from_str(&body)
            .map_err(|e| RrfError::Decode(format!("{e}: {}", truncate(&body, 120))))?;
        Ok(Reply::Structured(value))
    } else {
        Ok(Reply::Text(body.into_owned()))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
