//! Demo command - exercise the main API calls against a live controller.
//!
//! Runs diagnostics, lists the standard directories, round-trips a small
//! file through `/sys`, dumps the object model and the machine state, and
//! uploads a gcode file. Printing it is opt-in.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::Value;
use tracing::info;

use rrf_core::config::AppConfig;
use rrf_core::error::RrfResult;

use crate::OutputFormat;

#[derive(Args)]
pub struct DemoArgs {
    /// Local text file round-tripped through /sys.
    #[arg(long, default_value = "demo-data/test.txt")]
    pub text_file: PathBuf,

    /// Local gcode file uploaded to /gcodes.
    #[arg(long, default_value = "demo-data/test.gcode")]
    pub gcode_file: PathBuf,

    /// Actually print the uploaded gcode file.
    #[arg(long)]
    pub print: bool,
}

const TEXT_DEST: &str = "/sys/test.txt";
const GCODE_DEST: &str = "/gcodes/test.gcode";

/// Run the demo walkthrough.
pub async fn run(config: &AppConfig, args: DemoArgs, format: OutputFormat) -> RrfResult<()> {
    let client = super::create_client(config).await?;
    let demo = Demo { format };
    info!("running demo against {}", client.base_url());

    demo.section("Diagnostics (M122)");
    super::print_reply(&client.diagnostics().await?, demo.format);

    for dir in ["/sys", "/gcodes", "/jobs"] {
        demo.section(&format!("Files in {dir}"));
        super::print_reply(&client.files(dir).await?, demo.format);
    }

    demo.section("/sys/config.g");
    super::print_reply(&client.download("/sys/config.g").await?, demo.format);

    demo.section(&format!("Upload, download, delete {TEXT_DEST}"));
    super::print_reply(&client.upload(&args.text_file, Some(TEXT_DEST)).await?, demo.format);
    super::print_reply(&client.download(TEXT_DEST).await?, demo.format);
    super::print_reply(&client.delete(TEXT_DEST).await?, demo.format);

    demo.section("Object model");
    demo.pretty(&Value::Object(client.query_model(None).await?));

    demo.section("Object model: volumes");
    demo.pretty(&Value::Object(client.query_model(Some("volumes")).await?));

    demo.section("Status");
    demo.pretty(&client.status().await?);

    demo.section(&format!("Upload {GCODE_DEST}"));
    super::print_reply(&client.upload(&args.gcode_file, Some(GCODE_DEST)).await?, demo.format);

    if args.print {
        demo.section(&format!("Print {GCODE_DEST}"));
        super::print_reply(&client.print(GCODE_DEST).await?, demo.format);
    } else if let OutputFormat::Text = demo.format {
        println!(
            "{}",
            style(format!("skipping print of {GCODE_DEST} (pass --print to start it)")).dim()
        );
    }

    demo.section("Print status (M27)");
    super::print_reply(&client.print_status().await?, demo.format);

    Ok(())
}

/// Output settings for the walkthrough.
struct Demo {
    format: OutputFormat,
}

impl Demo {
    /// Section heading, text output only.
    fn section(&self, title: &str) {
        if let OutputFormat::Text = self.format {
            println!();
            println!("{}", style(title).bold().underlined());
        }
    }

    fn pretty(&self, value: &Value) {
        match self.format {
            OutputFormat::Text => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default())
            }
            OutputFormat::Json => println!("{value}"),
        }
    }
}
