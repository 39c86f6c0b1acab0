//! Files command - manage files on the controller's storage.

use std::path::PathBuf;

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use rrf_api::Reply;
use rrf_core::config::AppConfig;
use rrf_core::error::{RrfError, RrfResult};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum FilesAction {
    /// List a directory.
    Ls {
        /// Remote directory.
        #[arg(default_value = "/gcodes")]
        dir: String,
        /// Names only (directories prefixed with `*`).
        #[arg(long)]
        names: bool,
    },
    /// Show file metadata.
    Info { name: String },
    /// Download a file.
    Download {
        name: String,
        /// Write to this local path instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a local file.
    Upload {
        local: PathBuf,
        /// Remote path. Defaults to the local file name.
        dest: Option<String>,
    },
    /// Delete a file or empty directory.
    Delete { name: String },
    /// Rename or move a file.
    Move { old: String, new: String },
    /// Create a directory.
    Mkdir { name: String },
}

/// Run a files subcommand.
pub async fn run(config: &AppConfig, action: FilesAction, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;

    match action {
        FilesAction::Ls { dir, names: true } => {
            let reply = client.files(&dir).await?;
            super::print_reply(&reply, format);
        }
        FilesAction::Ls { dir, names: false } => match format {
            OutputFormat::Json => {
                let reply = client.filelist(&dir).await?;
                super::print_reply(&reply, format);
            }
            OutputFormat::Text => {
                let list = client.file_entries(&dir).await?;
                if list.files.is_empty() {
                    println!("{} is empty.", list.dir);
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .apply_modifier(UTF8_ROUND_CORNERS)
                    .set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Name", "Size", "Modified"]);

                for entry in &list.files {
                    let name = if entry.is_dir() {
                        format!("{}/", entry.name)
                    } else {
                        entry.name.clone()
                    };
                    let size = if entry.is_dir() {
                        "-".to_string()
                    } else {
                        super::format_bytes(entry.size)
                    };
                    table.add_row(vec![name, size, entry.date.clone().unwrap_or_else(|| "-".into())]);
                }

                println!("{}", style(&list.dir).bold().underlined());
                println!("{table}");
                if list.next > 0 {
                    println!("{}", style(format!("(more entries from index {})", list.next)).dim());
                }
            }
        },
        FilesAction::Info { name } => {
            let reply = client.fileinfo(&name).await?;
            super::print_reply(&reply, format);
        }
        FilesAction::Download { name, output: Some(path) } => {
            let bytes = client.download_bytes(&name).await?;
            tokio::fs::write(&path, &bytes).await?;
            println!(
                "{} {name} -> {} ({})",
                style("OK").green().bold(),
                path.display(),
                super::format_bytes(bytes.len() as u64)
            );
        }
        FilesAction::Download { name, output: None } => {
            let reply = client.download(&name).await?;
            super::print_reply(&reply, format);
        }
        FilesAction::Upload { local, dest } => {
            let reply = client.upload(&local, dest.as_deref()).await?;
            report(&reply, &format!("uploaded {}", local.display()), format)?;
        }
        FilesAction::Delete { name } => {
            let reply = client.delete(&name).await?;
            report(&reply, &format!("deleted {name}"), format)?;
        }
        FilesAction::Move { old, new } => {
            let reply = client.move_file(&old, &new).await?;
            report(&reply, &format!("moved {old} -> {new}"), format)?;
        }
        FilesAction::Mkdir { name } => {
            let reply = client.mkdir(&name).await?;
            report(&reply, &format!("created {name}"), format)?;
        }
    }

    Ok(())
}

/// Print the outcome of a file operation, failing on a non-zero `err`.
fn report(reply: &Reply, done: &str, format: OutputFormat) -> RrfResult<()> {
    if let Some(code) = reply.get("err").and_then(|v| v.as_i64()) {
        if code != 0 {
            return Err(RrfError::Protocol(format!("{done}: controller returned err {code}")));
        }
    }
    match format {
        OutputFormat::Json => super::print_reply(reply, format),
        OutputFormat::Text => println!("{} {done}", style("OK").green().bold()),
    }
    Ok(())
}
