//! Print job commands.

use console::style;
use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;

use crate::OutputFormat;

/// Start printing a file already on the controller.
pub async fn print(config: &AppConfig, path: &str, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let reply = client.print(path).await?;

    match format {
        OutputFormat::Json => super::print_reply(&reply, format),
        OutputFormat::Text => {
            println!("{} Started {path}", style("OK").green().bold());
            if !reply.is_empty() {
                super::print_reply(&reply, format);
            }
        }
    }
    Ok(())
}

pub async fn print_status(config: &AppConfig, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let reply = client.print_status().await?;
    super::print_reply(&reply, format);
    Ok(())
}
