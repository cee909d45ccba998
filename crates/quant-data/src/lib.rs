//! Bar sources for the analysis core.

mod csv_source;

pub use csv_source::CsvBarSource;

use quant_core::error::DataError;
use quant_core::traits::BarSource;
use quant_core::types::{BarSeries, Timeframe};

/// Load every bar of a CSV file as one series.
pub async fn load_csv(path: &str, symbol: &str, timeframe: Timeframe) -> Result<BarSeries, DataError> {
    let source = CsvBarSource::new(path)?;
    source.get_bars(symbol, timeframe, None, None).await
}
