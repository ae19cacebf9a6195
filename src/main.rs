use anyhow::{Context, Result};
use clap::Parser;
use resume_ranker::cli::{handle_command, Cli};
use resume_ranker::RankerConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.apply_overrides(RankerConfig::load(cli.config.as_deref())?);

    // Logs go to a file so they never mix with the terminal page
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting resume-ranker");
    info!("Configuration environment: {}", RankerConfig::environment());
    info!("API URL: {}", config.api_url);
    info!("Demo mode: {}", config.demo);

    handle_command(cli.command, config).await
}
