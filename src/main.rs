//! Indicator and signal analysis CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use quant_config::{load_config, LogFormat};
use quant_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    let _guard = setup_logging(&config.logging)?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Indicators(args) => cli::commands::indicators::run(args).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
