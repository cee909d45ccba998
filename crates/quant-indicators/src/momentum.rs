//! Momentum indicators.

use quant_core::error::IndicatorError;
use quant_core::traits::Indicator;
use quant_core::types::{
    zip_with, BarSeries, IndicatorSpec, Line, ParamSpec, Params, PlotType, Series,
};

use crate::moving_average::{defined, ema, sma};

/// Wilder's Relative Strength Index over close prices.
///
/// The first `period` positions are undefined. When the average loss is
/// zero the value is 100, or 50 if the average gain is zero as well (a flat
/// series).
pub fn rsi(closes: &[f64], period: usize) -> Series {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return result;
    }

    let period_f64 = period as f64;
    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| c.max(0.0);
    let loss = |c: f64| (-c).max(0.0);

    // Initial averages over the first `period` changes
    let mut avg_gain = changes[..period].iter().copied().map(gain).sum::<f64>() / period_f64;
    let mut avg_loss = changes[..period].iter().copied().map(loss).sum::<f64>() / period_f64;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
    for (offset, &change) in changes[period..].iter().enumerate() {
        avg_gain = (avg_gain * (period_f64 - 1.0) + gain(change)) / period_f64;
        avg_loss = (avg_loss * (period_f64 - 1.0) + loss(change)) / period_f64;
        result[period + 1 + offset] = Some(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// MACD output lines.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    /// Fast EMA - slow EMA
    pub macd: Series,
    /// EMA of the MACD line
    pub signal: Series,
    /// MACD - signal
    pub histogram: Series,
}

/// Moving Average Convergence Divergence over close prices.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let closes = defined(closes);
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);

    let macd = zip_with(&fast_ema, &slow_ema, |f, s| f - s);
    let signal = ema(&macd, signal);
    let histogram = zip_with(&macd, &signal, |m, s| m - s);

    MacdLines {
        macd,
        signal,
        histogram,
    }
}

/// KDJ output lines.
#[derive(Debug, Clone, PartialEq)]
pub struct KdjLines {
    pub k: Series,
    pub d: Series,
    pub j: Series,
}

/// KDJ stochastic oscillator.
///
/// Raw stochastic over `length` bars, %K = SMA(`smooth_k`) of it,
/// %D = SMA(`smooth_d`) of %K and J = 3K - 2D. A window with no range
/// has a raw stochastic of 50.
pub fn kdj(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    length: usize,
    smooth_k: usize,
    smooth_d: usize,
) -> KdjLines {
    let len = high.len().min(low.len()).min(close.len());
    let mut raw: Series = vec![None; len];

    if length > 0 {
        for i in (length - 1)..len {
            let start = i + 1 - length;
            let highest = high[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = low[start..=i].iter().copied().fold(f64::INFINITY, f64::min);

            let range = highest - lowest;
            raw[i] = Some(if range == 0.0 {
                50.0
            } else {
                (close[i] - lowest) / range * 100.0
            });
        }
    }

    let k = sma(&raw, smooth_k);
    let d = sma(&k, smooth_d);
    let j = zip_with(&k, &d, |k, d| 3.0 * k - 2.0 * d);

    KdjLines { k, d, j }
}

/// Relative Strength Index (RSI).
#[derive(Debug, Clone, Copy, Default)]
pub struct Rsi;

impl Rsi {
    pub const ID: &'static str = "RSI";

    pub fn spec() -> IndicatorSpec {
        IndicatorSpec::new(Self::ID, "Relative Strength Index", PlotType::Oscillator)
            .describe("Wilder-smoothed ratio of average gains to average losses, bounded to [0, 100]")
            .param(ParamSpec::integer("period", "Smoothing period in bars", 14, 1, 500))
            .output("rsi")
    }
}

impl Indicator for Rsi {
    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError> {
        // One extra bar for the first price change
        Ok(params.usize(Self::ID, "period")? + 1)
    }

    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError> {
        let period = params.usize(Self::ID, "period")?;
        Ok(vec![Line::new("rsi", rsi(&series.closes(), period))])
    }
}

/// Validated MACD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdParams {
    pub fn from_params(params: &Params) -> Result<Self, IndicatorError> {
        let fast = params.usize(Macd::ID, "fast")?;
        let slow = params.usize(Macd::ID, "slow")?;
        let signal = params.usize(Macd::ID, "signal")?;
        if fast >= slow {
            return Err(IndicatorError::invalid(
                Macd::ID,
                format!("fast ({fast}) must be less than slow ({slow})"),
            ));
        }
        Ok(Self { fast, slow, signal })
    }
}

/// MACD indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Macd;

impl Macd {
    pub const ID: &'static str = "MACD";

    pub fn spec() -> IndicatorSpec {
        IndicatorSpec::new(Self::ID, "MACD", PlotType::Oscillator)
            .describe("Difference of a fast and a slow EMA, with its signal line and histogram")
            .param(ParamSpec::integer("fast", "Fast EMA period", 12, 1, 500))
            .param(ParamSpec::integer("slow", "Slow EMA period", 26, 1, 500))
            .param(ParamSpec::integer("signal", "Signal EMA period", 9, 1, 500))
            .output("macd")
            .output("signal")
            .output("histogram")
    }
}

impl Indicator for Macd {
    fn validate(&self, params: &Params) -> Result<(), IndicatorError> {
        MacdParams::from_params(params).map(|_| ())
    }

    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError> {
        let p = MacdParams::from_params(params)?;
        Ok(p.slow + p.signal - 1)
    }

    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError> {
        let p = MacdParams::from_params(params)?;
        let lines = macd(&series.closes(), p.fast, p.slow, p.signal);
        Ok(vec![
            Line::new("macd", lines.macd),
            Line::new("signal", lines.signal),
            Line::new("histogram", lines.histogram),
        ])
    }
}

/// Validated KDJ parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdjParams {
    pub length: usize,
    pub smooth_k: usize,
    pub smooth_d: usize,
}

impl KdjParams {
    pub fn from_params(params: &Params) -> Result<Self, IndicatorError> {
        Ok(Self {
            length: params.usize(Kdj::ID, "length")?,
            smooth_k: params.usize(Kdj::ID, "smooth_k")?,
            smooth_d: params.usize(Kdj::ID, "smooth_d")?,
        })
    }
}

/// KDJ stochastic indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kdj;

impl Kdj {
    pub const ID: &'static str = "KDJ";

    pub fn spec() -> IndicatorSpec {
        IndicatorSpec::new(Self::ID, "KDJ", PlotType::Oscillator)
            .describe("Smoothed stochastic %K and %D with the J divergence line")
            .param(ParamSpec::integer("length", "Look-back window in bars", 9, 1, 500))
            .param(ParamSpec::integer("smooth_k", "%K smoothing period", 3, 1, 100))
            .param(ParamSpec::integer("smooth_d", "%D smoothing period", 3, 1, 100))
            .output("k")
            .output("d")
            .output("j")
    }
}

impl Indicator for Kdj {
    fn required_bars(&self, params: &Params) -> Result<usize, IndicatorError> {
        let p = KdjParams::from_params(params)?;
        Ok(p.length + p.smooth_k + p.smooth_d - 2)
    }

    fn compute(&self, series: &BarSeries, params: &Params) -> Result<Vec<Line>, IndicatorError> {
        let p = KdjParams::from_params(params)?;
        let lines = kdj(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            p.length,
            p.smooth_k,
            p.smooth_d,
        );
        Ok(vec![
            Line::new("k", lines.k),
            Line::new("d", lines.d),
            Line::new("j", lines.j),
        ])
    }
}
