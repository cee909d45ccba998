//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::types::{BarSeries, Line, Params};

/// Pure computation behind a registered indicator.
///
/// Implementations read the bar series and resolved parameters and produce
/// one line per declared output, each aligned to the series. They hold no
/// mutable state, so one instance can serve concurrent requests.
pub trait Indicator: Send + Sync {
    /// Check constraints between parameters that a per-parameter range
    /// cannot express (e.g. MACD fast < slow).
    fn validate(&self, _params: &Params) -> Result<(), IndicatorError> {
        Ok(())
    }

    /// Minimum number of bars needed for the given parameters.
    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError>;

    /// Calculate the output lines for the given series.
    ///
    /// Leading positions without enough history are `None`.
    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError>;

    /// Validate that there's enough data.
    fn validate_data(
        &self,
        id: &str,
        series: &BarSeries,
        params: &Params,
    ) -> Result<(), IndicatorError> {
        let required = self.required_bars(params)?;
        if series.len() < required {
            return Err(IndicatorError::InsufficientData {
                indicator: params.label(id),
                required,
                available: series.len(),
            });
        }
        Ok(())
    }
}
