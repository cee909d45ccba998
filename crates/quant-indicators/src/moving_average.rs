//! Moving average indicators.

use quant_core::error::IndicatorError;
use quant_core::traits::Indicator;
use quant_core::types::{BarSeries, IndicatorSpec, Line, ParamSpec, Params, PlotType, Series};

/// Lift plain prices into a fully defined series.
pub fn defined(values: &[f64]) -> Series {
    values.iter().copied().map(Some).collect()
}

/// Simple moving average over a possibly partially undefined input.
///
/// Position `i` is defined only when the `period` inputs ending at `i` are
/// all defined. The window sum is kept as offsets from the first value of
/// the current run, so a flat input averages to exactly that value.
pub fn sma(values: &[Option<f64>], period: usize) -> Series {
    let mut result = vec![None; values.len()];
    if period == 0 {
        return result;
    }

    let period_f64 = period as f64;
    let mut anchor: Option<f64> = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    // Sliding window
    for i in 0..values.len() {
        if let Some(value) = values[i] {
            let base = *anchor.get_or_insert(value);
            sum += value - base;
            count += 1;
        }
        if i >= period {
            if let (Some(old), Some(base)) = (values[i - period], anchor) {
                sum -= old - base;
                count -= 1;
            }
        }
        match anchor {
            Some(base) if count == period => result[i] = Some(base + sum / period_f64),
            _ if count == 0 => {
                sum = 0.0;
                anchor = None;
            }
            _ => {}
        }
    }

    result
}

/// Exponential moving average over a possibly partially undefined input.
///
/// Seeded with the simple average of the first `period` consecutive defined
/// inputs, then smoothed with `2 / (period + 1)`. An undefined input yields
/// an undefined output and forces a fresh seed.
pub fn ema(values: &[Option<f64>], period: usize) -> Series {
    let mut result = vec![None; values.len()];
    if period == 0 {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut current: Option<f64> = None;
    let mut seed_base: Option<f64> = None;
    let mut seed_sum = 0.0;
    let mut seed_count = 0usize;

    for (i, value) in values.iter().enumerate() {
        let Some(price) = *value else {
            current = None;
            seed_base = None;
            seed_sum = 0.0;
            seed_count = 0;
            continue;
        };

        current = match current {
            Some(prev) => Some(prev + multiplier * (price - prev)),
            None => {
                let base = *seed_base.get_or_insert(price);
                seed_sum += price - base;
                seed_count += 1;
                (seed_count == period).then(|| base + seed_sum / period as f64)
            }
        };
        result[i] = current;
    }

    result
}

/// Simple Moving Average (MA) of close prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sma;

impl Sma {
    pub const ID: &'static str = "MA";

    pub fn spec() -> IndicatorSpec {
        IndicatorSpec::new(Self::ID, "Moving Average", PlotType::Overlay)
            .describe("Arithmetic mean of the last N closes")
            .param(ParamSpec::integer("period", "Window length in bars", 5, 1, 500))
            .output("ma")
    }
}

impl Indicator for Sma {
    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError> {
        params.usize(Self::ID, "period")
    }

    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError> {
        let period = params.usize(Self::ID, "period")?;
        let closes = defined(&series.closes());
        Ok(vec![Line::new("ma", sma(&closes, period))])
    }
}

/// Exponential Moving Average (EMA) of close prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ema;

impl Ema {
    pub const ID: &'static str = "EMA";

    pub fn spec() -> IndicatorSpec {
        IndicatorSpec::new(Self::ID, "Exponential Moving Average", PlotType::Overlay)
            .describe("Exponentially weighted average of closes, seeded with a simple average")
            .param(ParamSpec::integer("period", "Smoothing period in bars", 12, 1, 500))
            .output("ema")
    }
}

impl Indicator for Ema {
    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError> {
        params.usize(Self::ID, "period")
    }

    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError> {
        let period = params.usize(Self::ID, "period")?;
        let closes = defined(&series.closes());
        Ok(vec![Line::new("ema", ema(&closes, period))])
    }
}
