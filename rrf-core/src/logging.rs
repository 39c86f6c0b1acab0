//! Structured logging setup using the `tracing` ecosystem.
//!
//! Console output plus a daily-rotated log file, optionally in JSON.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::error::RrfResult;

/// File name prefix of the daily log files.
const LOG_FILE_PREFIX: &str = "rrf.log";

/// Initialize the global tracing subscriber with the given settings.
///
/// # Arguments
/// * `level` - Log level or filter directive: "trace", "debug", "rrf_api=debug", ...
/// * `log_dir` - Directory for log files
/// * `json_output` - If true, use JSON format for file output
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> RrfResult<LogGuard> {
    let (subscriber, guard) = build_subscriber(level, log_dir, json_output)?;
    subscriber.try_init().ok();

    tracing::debug!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Console layer plus a file layer writing to `log_dir`.
fn build_subscriber(
    level: &str,
    log_dir: &Path,
    json_output: bool,
) -> RrfResult<(impl Subscriber + Send + Sync + 'static, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer: Box<dyn Layer<Registry> + Send + Sync> = if json_output {
        fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        .with(console_layer);

    Ok((subscriber, guard))
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Initialize a minimal console-only logger for tests or simple CLI usage.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact())
        .try_init();
}
