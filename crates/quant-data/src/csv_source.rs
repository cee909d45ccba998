//! CSV bar source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use quant_core::error::DataError;
use quant_core::traits::BarSource;
use quant_core::types::{Bar, BarSeries, Timeframe};

/// CSV record format.
///
/// Accepts the usual English headers as well as the Chinese vendor export
/// headers.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "trade_date",
        alias = "trade_time",
        alias = "timestamp",
        alias = "日期",
        alias = "时间"
    )]
    date: String,
    #[serde(alias = "Open", alias = "开盘")]
    open: f64,
    #[serde(alias = "High", alias = "最高")]
    high: f64,
    #[serde(alias = "Low", alias = "最低")]
    low: f64,
    #[serde(alias = "Close", alias = "Adj Close", alias = "收盘")]
    close: f64,
    #[serde(alias = "Volume", alias = "成交量", default)]
    volume: f64,
}

/// Historical daily bars stored in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV content into bars sorted by date.
    fn parse_bars(content: &[u8]) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = parse_date(&record.date)?;
            bars.push(Bar::new(
                date,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            )?);
        }

        bars.sort_by_key(|b| b.date());
        Ok(bars)
    }
}

/// Parse various date formats; time-of-day components are dropped.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_str = date_str.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    // Compact YYYYMMDD
    if date_str.len() == 8 && date_str.bytes().all(|b| b.is_ascii_digit()) {
        let part = |range: std::ops::Range<usize>| date_str[range].parse::<u32>().ok();
        if let (Some(y), Some(m), Some(d)) = (part(0..4), part(4..6), part(6..8)) {
            if let Some(date) = NaiveDate::from_ymd_opt(y as i32, m, d) {
                return Ok(date);
            }
        }
    }

    // Unix timestamp, milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let dt = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = dt {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<BarSeries, DataError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DataError::Internal(format!("{}: {}", self.path.display(), e)))?;

        let bars: Vec<Bar> = Self::parse_bars(&content)?
            .into_iter()
            .filter(|b| start.map_or(true, |s| b.date() >= s))
            .filter(|b| end.map_or(true, |e| b.date() <= e))
            .collect();

        debug!(
            path = %self.path.display(),
            symbol,
            bars = bars.len(),
            "Loaded bars from CSV"
        );
        BarSeries::new(symbol, timeframe, bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
