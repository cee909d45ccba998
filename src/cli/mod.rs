//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quant")]
#[command(author, version, about = "Technical indicators and trading signals for daily stock bars")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators and detect signals for one instrument
    Analyze(AnalyzeArgs),
    /// List available indicators
    Indicators(IndicatorsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Data file (CSV), or a directory containing {symbol}.csv
    #[arg(short, long)]
    pub data: PathBuf,

    /// Instrument symbol (defaults to the file name)
    #[arg(short = 'S', long)]
    pub symbol: Option<String>,

    /// Timeframe (daily, weekly, monthly)
    #[arg(short, long, default_value = "daily")]
    pub timeframe: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Indicators, e.g. "MA:period=5;MACD:fast=8,slow=21;RSI"
    #[arg(short, long)]
    pub indicators: Option<String>,

    /// Short moving average period for golden/death crosses
    #[arg(long)]
    pub ma_short: Option<usize>,

    /// Long moving average period for golden/death crosses
    #[arg(long)]
    pub ma_long: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save results to file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "quant",
            "--log-level",
            "debug",
            "analyze",
            "--data",
            "bars.csv",
            "--indicators",
            "MA:period=5;RSI",
            "--ma-short",
            "5",
            "--ma-long",
            "20",
            "--output",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.log_level, Some(LogLevel::Debug)));
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.data, PathBuf::from("bars.csv"));
                assert_eq!(args.ma_short, Some(5));
                assert_eq!(args.ma_long, Some(20));
                assert!(args.output == OutputFormat::Json);
                assert_eq!(args.timeframe, "daily");
            }
            _ => panic!("expected analyze"),
        }
    }
}
