use std::path::{Path, PathBuf};

use anyhow::Context;
use asset_tally::config::Config;
use clap::{Parser, ValueEnum};
use tracing::error;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Parser)]
struct Opts {
    #[clap(short, long, env = "ASSET_TALLY_CONFIG")]
    config: Option<PathBuf>,
    /// Path or URL of the CSV export, overrides the configured source.
    #[clap(short, long, env = "ASSET_TALLY_SOURCE")]
    source: Option<String>,
    #[clap(short, long, value_enum, default_value = "json")]
    format: Format,
    #[clap(long)]
    pretty: bool,
}

async fn read_config(path: &Path) -> anyhow::Result<Config> {
    let config = tokio::fs::read_to_string(path)
        .await
        .with_context(|| "read config")?;
    serde_yaml::from_str(&config)
        .with_context(|| format!("parse config from {}", path.display()))
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let mut config = match &opts.config {
        Some(path) => read_config(path).await?,
        None => Config::default(),
    };
    if let Some(source) = opts.source {
        config.source = source;
    }
    let summary = asset_tally::load_summary(&config)
        .await
        .with_context(|| format!("summarize {}", config.source))?;
    let output = match opts.format {
        Format::Json if opts.pretty => serde_json::to_string_pretty(&summary)?,
        Format::Json => serde_json::to_string(&summary)?,
        Format::Text => asset_tally::report::render_text(&summary),
    };
    println!("{}", output.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    if let Err(e) = run(opts).await {
        error!(?e, "critical error");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}
