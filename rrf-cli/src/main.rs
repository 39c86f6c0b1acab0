//! RepRapFirmware CLI - talk to a controller's HTTP interface from the terminal.
//!
//! Sends gcode (waiting for the reply by default), manages files on the
//! controller's storage, and dumps the object model. Useful for scripting
//! and for checking a board without opening the web console.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;
use rrf_core::logging;

/// RepRapFirmware controller client.
#[derive(Parser)]
#[command(
    name = "rrf",
    version,
    about = "RepRapFirmware HTTP API client",
    long_about = "A command-line client for the rr_ HTTP interface of RepRapFirmware boards.\n\
                  Send gcode, manage files, and query the object model."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Controller host or URL (overrides config).
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a gcode command and print its reply.
    Gcode {
        /// Command to send.
        #[arg(default_value = "M122")]
        command: String,
        /// Return the submission response without waiting for a reply.
        #[arg(long)]
        no_wait: bool,
        /// Key the reply is expected to carry.
        #[arg(short, long)]
        expect: Option<String>,
        /// On timeout, answer `{<expect>: null}` instead of an empty reply.
        #[arg(long, requires = "expect")]
        force: bool,
    },
    /// Read the reply buffer once.
    Reply,
    /// Manage files on the controller.
    Files {
        #[command(subcommand)]
        action: commands::files::FilesAction,
    },
    /// Query one object model key through rr_model.
    Model {
        /// Object model key, e.g. "move.axes".
        key: String,
        /// Query flags.
        #[arg(long, default_value = "v")]
        flags: String,
    },
    /// Dump the object model through M409, one key at a time.
    Config {
        /// Only this top-level key.
        key: Option<String>,
    },
    /// Show the machine state.
    Status,
    /// Start printing a file from the controller's storage.
    Print {
        /// Remote path, e.g. "/gcodes/part.gcode".
        path: String,
    },
    /// Show SD print progress.
    PrintStatus,
    /// Open a session with the board password.
    Connect {
        /// Board password (overrides config).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Close the session.
    Disconnect,
    /// Walk through the main API calls against a controller.
    Demo(commands::demo::DemoArgs),
}

#[tokio::main]
async fn main() -> RrfResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_default()?,
    };
    if let Some(host) = cli.host {
        config.controller.host = host;
    }

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let _guard = match config.effective_log_dir() {
        Ok(dir) => Some(logging::init_logging(&log_level, &dir, config.logging.json_output)?),
        Err(_) => {
            logging::init_console_logging(&log_level);
            None
        }
    };

    debug!(
        "{} CLI v{} -> {}",
        rrf_core::constants::APP_NAME,
        rrf_core::constants::APP_VERSION,
        config.controller.base_url()
    );

    let format = cli.format;
    match cli.command {
        Commands::Gcode { command, no_wait, expect, force } => {
            commands::gcode::run(&config, &command, no_wait, expect.as_deref(), force, format).await
        }
        Commands::Reply => commands::gcode::reply(&config, format).await,
        Commands::Files { action } => commands::files::run(&config, action, format).await,
        Commands::Model { key, flags } => commands::model::model(&config, &key, &flags, format).await,
        Commands::Config { key } => commands::model::dump(&config, key.as_deref(), format).await,
        Commands::Status => commands::model::status(&config, format).await,
        Commands::Print { path } => commands::jobs::print(&config, &path, format).await,
        Commands::PrintStatus => commands::jobs::print_status(&config, format).await,
        Commands::Connect { password } => {
            commands::connect(&config, password.as_deref(), format).await
        }
        Commands::Disconnect => commands::disconnect(&config).await,
        Commands::Demo(args) => commands::demo::run(&config, args, format).await,
    }
}
