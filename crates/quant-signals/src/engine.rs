//! Signal engine: scans computed indicator outputs for discrete events.

use tracing::{debug, warn};

use quant_core::types::{BarSeries, IndicatorResult, SignalEvent, SignalKind, SignalTrigger};

use crate::config::SignalConfig;
use crate::crossover::{detect_crossovers, Direction};
use crate::threshold::{detect_threshold_crossings, Zone};

/// Indicator outputs the signal rules read from.
///
/// A missing input disables the rule that needs it for this run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalInputs<'a> {
    pub ma_short: Option<&'a IndicatorResult>,
    pub ma_long: Option<&'a IndicatorResult>,
    pub rsi: Option<&'a IndicatorResult>,
    pub macd: Option<&'a IndicatorResult>,
}

/// One output line of a computed indicator.
struct LineRef<'a> {
    result: &'a IndicatorResult,
    name: &'a str,
    values: &'a [Option<f64>],
}

impl<'a> LineRef<'a> {
    fn new(result: &'a IndicatorResult, name: &'a str, expected_len: usize) -> Option<Self> {
        let Some(values) = result.values(name) else {
            warn!(indicator = %result.label, line = name, "Signal input line missing");
            return None;
        };
        if values.len() != expected_len {
            warn!(
                indicator = %result.label,
                line = name,
                len = values.len(),
                expected = expected_len,
                "Signal input not aligned with series"
            );
            return None;
        }
        Some(Self { result, name, values })
    }

    fn primary(result: &'a IndicatorResult, expected_len: usize) -> Option<Self> {
        let name = result.lines.first().map(|l| l.name.as_str())?;
        Self::new(result, name, expected_len)
    }

    fn trigger(&self, index: usize) -> Option<SignalTrigger> {
        self.values.get(index).copied().flatten().map(|value| SignalTrigger {
            indicator: self.result.label.clone(),
            line: self.name.to_string(),
            value,
        })
    }
}

/// Detects crossover and threshold events.
///
/// Never recomputes indicators and never fails: no qualifying event is an
/// empty result.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    config: SignalConfig,
}

impl SignalEngine {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Run every enabled rule; events are sorted by date, then by kind.
    pub fn detect(&self, series: &BarSeries, inputs: &SignalInputs<'_>) -> Vec<SignalEvent> {
        let mut events = Vec::new();
        if series.is_empty() {
            return events;
        }
        let len = series.len();

        if self.config.ma_cross.enabled {
            match (inputs.ma_short, inputs.ma_long) {
                (Some(short), Some(long)) => {
                    if let (Some(a), Some(b)) = (LineRef::primary(short, len), LineRef::primary(long, len)) {
                        events.extend(cross_events(
                            series,
                            &a,
                            &b,
                            SignalKind::GoldenCross,
                            SignalKind::DeathCross,
                        ));
                    }
                }
                _ => debug!("MA cross rule skipped, inputs unavailable"),
            }
        }

        if self.config.rsi_alert.enabled {
            match inputs.rsi.and_then(|r| LineRef::primary(r, len)) {
                Some(rsi) => events.extend(self.rsi_events(series, &rsi)),
                None => debug!("RSI alert rule skipped, input unavailable"),
            }
        }

        if self.config.macd_cross.enabled {
            let lines = inputs.macd.and_then(|r| {
                Some((LineRef::new(r, "macd", len)?, LineRef::new(r, "signal", len)?))
            });
            match lines {
                Some((macd, signal)) => events.extend(cross_events(
                    series,
                    &macd,
                    &signal,
                    SignalKind::MacdBullishCross,
                    SignalKind::MacdBearishCross,
                )),
                None => debug!("MACD cross rule skipped, input unavailable"),
            }
        }

        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));
        debug!(symbol = series.symbol(), signals = events.len(), "Signals detected");
        events
    }

    fn rsi_events(&self, series: &BarSeries, rsi: &LineRef<'_>) -> Vec<SignalEvent> {
        let rule = &self.config.rsi_alert;
        detect_threshold_crossings(rsi.values, rule.lower, rule.upper)
            .into_iter()
            .filter_map(|crossing| {
                let kind = match crossing.zone {
                    Zone::Above => SignalKind::Overbought,
                    Zone::Below => SignalKind::Oversold,
                    Zone::Neutral => return None,
                };
                let bar = series.get(crossing.index)?;
                let trigger = rsi.trigger(crossing.index)?;
                Some(SignalEvent::new(bar.date(), crossing.index, kind, vec![trigger]))
            })
            .collect()
    }
}

fn cross_events(
    series: &BarSeries,
    a: &LineRef<'_>,
    b: &LineRef<'_>,
    up: SignalKind,
    down: SignalKind,
) -> Vec<SignalEvent> {
    detect_crossovers(a.values, b.values)
        .into_iter()
        .filter_map(|crossover| {
            let kind = match crossover.direction {
                Direction::Up => up,
                Direction::Down => down,
            };
            let bar = series.get(crossover.index)?;
            let triggers = vec![a.trigger(crossover.index)?, b.trigger(crossover.index)?];
            Some(SignalEvent::new(bar.date(), crossover.index, kind, triggers))
        })
        .collect()
}
