//! Application configuration management.
//!
//! Holds the controller connection settings (host, optional password,
//! request timeout, poll throttle, reply timeout) and logging settings.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{RrfError, RrfResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Controller connection settings.
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Controller connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Hostname, IP address, or URL of the controller.
    #[serde(default = "default_host")]
    pub host: String,

    /// Board password for `rr_connect`. Empty when the board has none.
    #[serde(default)]
    pub password: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Minimum spacing between reply polls, and between model sub-queries.
    #[serde(default = "default_throttle")]
    pub throttle_ms: u64,

    /// How long a synchronous command waits for a reply.
    #[serde(default = "default_reply_timeout")]
    pub reply_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_host() -> String {
    constants::DEFAULT_HOST.to_string()
}

fn default_request_timeout() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_throttle() -> u64 {
    constants::DEFAULT_THROTTLE_MS
}

fn default_reply_timeout() -> u64 {
    constants::DEFAULT_REPLY_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            password: String::new(),
            request_timeout_ms: default_request_timeout(),
            throttle_ms: default_throttle(),
            reply_timeout_ms: default_reply_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ControllerConfig {
    /// Config for a host with every other setting at its default.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Base URL of the controller's HTTP interface.
    pub fn base_url(&self) -> String {
        AppConfig::sanitize_host(&self.host)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> RrfResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> RrfResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> RrfResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RrfError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    ///
    /// - Linux: `~/.config/RepRapFirmware/config.toml`
    /// - macOS: `~/Library/Application Support/RepRapFirmware/config.toml`
    /// - Windows: `%APPDATA%/RepRapFirmware/config.toml`
    pub fn default_config_path() -> RrfResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| RrfError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::APP_NAME).join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> RrfResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let base = dirs::data_dir()
                .ok_or_else(|| RrfError::Config("could not determine data directory".into()))?;
            Ok(base.join(constants::APP_NAME).join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Sanitize a controller host into a base URL.
    ///
    /// Bare hosts get `http://` (the firmware serves plain HTTP), and
    /// trailing slashes are stripped so endpoint paths can be appended.
    pub fn sanitize_host(host: &str) -> String {
        let trimmed = host.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return format!("http://{}", constants::DEFAULT_HOST);
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.controller.host, "localhost");
        assert_eq!(config.controller.throttle_ms, 500);
        assert_eq!(config.controller.reply_timeout_ms, 2_000);
        assert_eq!(config.controller.request_timeout_ms, 30_000);
        assert!(config.controller.password.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sanitize_host() {
        assert_eq!(AppConfig::sanitize_host("192.168.1.50"), "http://192.168.1.50");
        assert_eq!(AppConfig::sanitize_host("http://duet.local/"), "http://duet.local");
        assert_eq!(
            AppConfig::sanitize_host("  \"https://printer.example.com/\"  "),
            "https://printer.example.com"
        );
        assert_eq!(AppConfig::sanitize_host("duet:8080"), "http://duet:8080");
        assert_eq!(AppConfig::sanitize_host(""), "http://localhost");
    }

    #[test]
    fn test_durations() {
        let config = ControllerConfig {
            throttle_ms: 250,
            reply_timeout_ms: 1_500,
            ..ControllerConfig::for_host("duet")
        };
        assert_eq!(config.throttle(), Duration::from_millis(250));
        assert_eq!(config.reply_timeout(), Duration::from_millis(1_500));
        assert_eq!(config.base_url(), "http://duet");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[controller]\nhost = \"10.0.0.7\"\n").unwrap();
        assert_eq!(config.controller.host, "10.0.0.7");
        assert_eq!(config.controller.throttle_ms, 500);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.controller.host = "duet3.local".into();
        config.controller.reply_timeout_ms = 5_000;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.controller.host, "duet3.local");
        assert_eq!(loaded.controller.reply_timeout_ms, 5_000);
    }
}
