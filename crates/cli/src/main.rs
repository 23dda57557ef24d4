use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stockcat_core::config::{self, ConfigError, DEFAULT_CONFIG_PATH};
use stockcat_core::pipeline;
use tracing::error;

#[derive(Parser)]
#[command(name = "stockcat")]
#[command(about = "Categorize stock media and build an upload spreadsheet", long_about = None)]
struct Cli {
    /// Path to the KEY = VALUE config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output JSON summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = match config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e @ ConfigError::NotFound(_)) => {
            error!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let summary = pipeline::run(&cfg).await?;
    if cli.json {
        let summary_json = serde_json::json!({
            "status": "ok",
            "output": cfg.output_csv,
            "discovered": summary.discovered,
            "recorded": summary.recorded,
            "uncategorized": summary.uncategorized,
            "skipped": summary.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&summary_json)?);
    } else {
        println!(
            "discovered {}, recorded {}, uncategorized {}, skipped {} -> {}",
            summary.discovered,
            summary.recorded,
            summary.uncategorized,
            summary.skipped,
            cfg.output_csv
        );
    }
    Ok(())
}
