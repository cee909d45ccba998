//! Analyze command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use quant_analysis::Analyzer;
use quant_config::AppConfig;
use quant_core::traits::BarSource;
use quant_core::types::{IndicatorRequest, Timeframe};
use quant_data::CsvBarSource;

use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let timeframe: Timeframe = args.timeframe.parse()?;
    let start = parse_date(args.start.as_deref()).context("Invalid --start")?;
    let end = parse_date(args.end.as_deref()).context("Invalid --end")?;

    let (path, symbol) = resolve_data_file(&args.data, args.symbol.as_deref())?;
    info!("Analyzing {} from {}", symbol, path.display());

    // Load data
    let source = CsvBarSource::new(&path)
        .with_context(|| format!("Data file '{}' does not exist", path.display()))?;
    let series = source
        .get_bars(&symbol, timeframe, start, end)
        .await
        .with_context(|| format!("Failed to load bars from {}", path.display()))?;

    let max_bars = config.analysis.max_bars;
    if series.len() > max_bars {
        anyhow::bail!(
            "Series has {} bars, more than the configured maximum of {} (narrow it with --start/--end)",
            series.len(),
            max_bars
        );
    }

    // Requests and signal rules
    let requests = match &args.indicators {
        Some(list) => IndicatorRequest::parse_list(list).context("Invalid --indicators")?,
        None => config.analysis.default_requests()?,
    };
    let mut signals = config.analysis.signals.clone();
    if let Some(short) = args.ma_short {
        signals.ma_cross.short = short;
    }
    if let Some(long) = args.ma_long {
        signals.ma_cross.long = long;
    }

    let result = Analyzer::global().analyze(&series, &requests, &signals)?;

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", result.to_json()?),
        OutputFormat::Text => println!("{}", result.summary()),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        tokio::fs::write(save_path, result.to_json()?).await?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(Into::into)
}

/// Resolve the CSV file and the symbol it holds.
///
/// A directory is searched for `{symbol}.csv` or `{symbol}_daily.csv`; a
/// file without an explicit symbol is named after its stem.
fn resolve_data_file(data: &Path, symbol: Option<&str>) -> Result<(PathBuf, String)> {
    if data.is_dir() {
        let symbol = symbol.context("--symbol is required when --data is a directory")?;
        let lower = symbol.to_lowercase();
        let candidates = [
            data.join(format!("{}.csv", symbol)),
            data.join(format!("{}.csv", lower)),
            data.join(format!("{}_daily.csv", symbol)),
            data.join(format!("{}_daily.csv", lower)),
        ];
        let path = candidates
            .into_iter()
            .find(|p| p.exists())
            .with_context(|| format!("No CSV file for {} in {}", symbol, data.display()))?;
        return Ok((path, symbol.to_string()));
    }

    let symbol = match symbol {
        Some(s) => s.to_string(),
        None => data
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "DATA".to_string()),
    };
    Ok((data.to_path_buf(), symbol))
}
