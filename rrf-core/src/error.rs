//! Error types for the RepRapFirmware client.
//!
//! Connection failures, timeouts, and decoding failures surface as
//! `RrfError`. HTTP status codes do not: every response body is decoded. A reply that never arrives is not an error: the
//! command coordinator recovers from it locally.

use thiserror::Error;

/// Convenience type alias for Results using RrfError.
pub type RrfResult<T> = Result<T, RrfError>;

/// Unified error type for the client crates.
#[derive(Error, Debug)]
pub enum RrfError {
    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- Network errors --
    /// HTTP request failed (connection refused, DNS, protocol).
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Controller rejected the board password.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    // -- Protocol errors --
    /// Body signalled JSON (header or leading brace) but did not parse.
    #[error("decode error: {0}")]
    Decode(String),

    /// Reply had an unexpected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RrfError {
    fn from(e: serde_json::Error) -> Self {
        RrfError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RrfError {
    fn from(e: toml::de::Error) -> Self {
        RrfError::Config(e.to_string())
    }
}

impl RrfError {
    /// Whether this error came from the network layer rather than the controller.
    pub fn is_transport(&self) -> bool {
        matches!(self, RrfError::Http(_) | RrfError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrf_error_display() {
        let err = RrfError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");

        let err = RrfError::AuthFailed("invalid board password".into());
        assert_eq!(err.to_string(), "authentication failed: invalid board password");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: RrfError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, RrfError::Config(_)));
    }

    #[test]
    fn test_is_transport() {
        assert!(RrfError::Timeout("slow".into()).is_transport());
        assert!(RrfError::Http("refused".into()).is_transport());
        assert!(!RrfError::Decode("bad json".into()).is_transport());
    }
}
