//! Gcode command - send a command and print the controller's reply.

use rrf_api::CommandMode;
use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;

use crate::OutputFormat;

/// Run the gcode command.
pub async fn run(
    config: &AppConfig,
    command: &str,
    no_wait: bool,
    expect: Option<&str>,
    force: bool,
    format: OutputFormat,
) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let mode = if no_wait {
        CommandMode::FireAndForget
    } else {
        CommandMode::Synchronous
    };

    let reply = client.send_command(command, mode, expect, force).await?;
    super::print_reply(&reply, format);
    Ok(())
}

/// Print whatever is in the reply buffer right now.
pub async fn reply(config: &AppConfig, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let reply = client.reply().await?;
    super::print_reply(&reply, format);
    Ok(())
}
