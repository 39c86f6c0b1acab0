//! Object model commands.

use console::style;
use serde_json::Value;

use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;

use crate::OutputFormat;

/// Query one key through `rr_model`.
pub async fn model(
    config: &AppConfig,
    key: &str,
    flags: &str,
    format: OutputFormat,
) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let reply = client.model(key, Some(flags)).await?;
    super::print_reply(&reply, format);
    Ok(())
}

/// Dump the object model, or one top-level key of it, through `M409`.
pub async fn dump(config: &AppConfig, key: Option<&str>, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let snapshot = client.query_model(key).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot).unwrap_or_default());
        }
        OutputFormat::Text => {
            for (name, value) in &snapshot {
                println!("{}", style(name).bold().underlined());
                if value.is_null() {
                    println!("  {}", style("(no reply)").dim());
                } else {
                    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
                }
                println!();
            }
        }
    }
    Ok(())
}

/// Show the `state` subtree: machine status and the current tool.
pub async fn status(config: &AppConfig, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let state = client.status().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&state).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("{}", style("Controller Status").bold().underlined());
            println!("  Host:    {}", client.base_url());
            if state.is_null() {
                println!("  Status:  {}", style("unknown (no reply)").yellow());
                return Ok(());
            }
            println!("  Status:  {}", field(&state, "status"));
            println!("  Tool:    {}", field(&state, "currentTool"));
            println!("  Uptime:  {}s", field(&state, "upTime"));
            if let Some(msg) = state.get("displayMessage").and_then(Value::as_str) {
                if !msg.is_empty() {
                    println!("  Message: {msg}");
                }
            }
        }
    }
    Ok(())
}

fn field(state: &Value, key: &str) -> String {
    match state.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
