//! Bar source trait definitions.

use crate::error::DataError;
use crate::types::{BarSeries, Timeframe};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Supplier of validated, date-ordered bar series.
///
/// How bars are acquired (files, vendors, synthetic fallbacks) is entirely
/// the implementation's concern; the analysis core only consumes the
/// resulting series.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch bars for an instrument.
    ///
    /// # Arguments
    /// * `symbol` - Instrument code
    /// * `timeframe` - Bar timeframe
    /// * `start` - Optional first date (inclusive)
    /// * `end` - Optional last date (inclusive)
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<BarSeries, DataError>;

    /// Get the name of this source.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    struct FixedSource;

    #[async_trait]
    impl BarSource for FixedSource {
        async fn get_bars(
            &self,
            symbol: &str,
            timeframe: Timeframe,
            start: Option<NaiveDate>,
            end: Option<NaiveDate>,
        ) -> Result<BarSeries, DataError> {
            let bars = (1..=10)
                .map(|d| {
                    let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
                    Bar::new(date, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap()
                })
                .filter(|b| start.map_or(true, |s| b.date() >= s))
                .filter(|b| end.map_or(true, |e| b.date() <= e))
                .collect();
            BarSeries::new(symbol, timeframe, bars)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_source_range_filtering() {
        let source = FixedSource;
        let start = NaiveDate::from_ymd_opt(2024, 2, 3);
        let end = NaiveDate::from_ymd_opt(2024, 2, 5);

        let series = source
            .get_bars("TEST", Timeframe::Daily, start, end)
            .await
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "TEST");
    }
}
