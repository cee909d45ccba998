//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::error::DataError;

/// One trading session.
///
/// Fields are private so a constructed bar always satisfies the OHLC
/// invariants: every value finite and non-negative, `high` the largest
/// price and `low` the smallest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBar")]
pub struct Bar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Deserialize)]
struct RawBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl TryFrom<RawBar> for Bar {
    type Error = DataError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        Bar::new(raw.date, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

impl Bar {
    /// Create a new validated bar.
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, DataError> {
        let invalid = |reason: String| DataError::InvalidBar {
            date: date.to_string(),
            reason,
        };

        for (field, value) in [
            ("open", open),
            ("high", high),
            ("low", low),
            ("close", close),
            ("volume", volume),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{field} is not finite")));
            }
            if value < 0.0 {
                return Err(invalid(format!("{field} is negative ({value})")));
            }
        }

        if high < open.max(close).max(low) {
            return Err(invalid(format!(
                "high {high} is below open/close/low"
            )));
        }
        if low > open.min(close).min(high) {
            return Err(invalid(format!("low {low} is above open/close/high")));
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Session date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Opening price.
    #[inline]
    pub fn open(&self) -> f64 {
        self.open
    }

    /// Highest price.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Lowest price.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Closing price.
    #[inline]
    pub fn close(&self) -> f64 {
        self.close
    }

    /// Trading volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Calculate the typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Date-ordered sequence of bars for one instrument.
///
/// Dates are strictly increasing, so there are no duplicates. The series is
/// read-only once built; indicator computations only ever borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct BarSeries {
    symbol: String,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    #[serde(default)]
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl TryFrom<RawSeries> for BarSeries {
    type Error = DataError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        BarSeries::new(raw.symbol, raw.timeframe, raw.bars)
    }
}

impl BarSeries {
    /// Create a bar series, rejecting unordered or duplicate dates.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        for pair in bars.windows(2) {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(DataError::DuplicateDate(current.to_string()));
            }
            if current < previous {
                return Err(DataError::OutOfOrder {
                    previous: previous.to_string(),
                    current: current.to_string(),
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            timeframe,
            bars,
        })
    }

    /// Create an empty series.
    pub fn empty(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars: Vec::new(),
        }
    }

    /// Instrument code.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Bar timeframe.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract session dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
