//! CLI command implementations.

pub mod demo;
pub mod files;
pub mod gcode;
pub mod jobs;
pub mod model;

use console::style;
use rrf_api::{Reply, RrfClient};
use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;

use crate::OutputFormat;

/// Helper to create a controller client from config.
///
/// Opens a session first when a board password is configured.
pub async fn create_client(config: &AppConfig) -> RrfResult<RrfClient> {
    let client = RrfClient::new(&config.controller)?;
    if !config.controller.password.is_empty() {
        client.connect(&config.controller.password).await?;
    }
    Ok(client)
}

/// Run the connect command.
pub async fn connect(
    config: &AppConfig,
    password: Option<&str>,
    format: OutputFormat,
) -> RrfResult<()> {
    let client = RrfClient::new(&config.controller)?;
    let password = password.unwrap_or(&config.controller.password);
    let reply = client.connect(password).await?;

    match format {
        OutputFormat::Json => print_reply(&reply, format),
        OutputFormat::Text => println!(
            "{} Connected to {}",
            style("OK").green().bold(),
            client.base_url()
        ),
    }
    Ok(())
}

/// Run the disconnect command.
pub async fn disconnect(config: &AppConfig) -> RrfResult<()> {
    let client = RrfClient::new(&config.controller)?;
    client.disconnect().await?;
    println!("{} Disconnected from {}", style("OK").green().bold(), client.base_url());
    Ok(())
}

/// Print a controller reply in the requested format.
pub fn print_reply(reply: &Reply, format: OutputFormat) {
    match (reply, format) {
        (Reply::Text(text), OutputFormat::Text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        (Reply::Text(text), OutputFormat::Json) => {
            println!("{}", serde_json::json!({ "text": text }));
        }
        (Reply::Structured(value), _) => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        }
    }
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
