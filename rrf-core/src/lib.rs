//! RepRapFirmware client core - configuration, error handling, and logging.
//!
//! Shared foundation for the `rrf-api` client and the `rrf` CLI:
//! - Controller connection and logging configuration (TOML on disk)
//! - The error taxonomy used by every request path
//! - Structured logging with tracing
//! - Protocol constants (endpoints, command aliases, default timings)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ControllerConfig};
pub use error::{RrfError, RrfResult};
pub use logging::init_logging;
