//! Signal events derived from indicator outputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of discrete signal event.
///
/// Declaration order doubles as the secondary sort key when several events
/// share a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Short moving average crosses above the long one.
    GoldenCross,
    /// Short moving average crosses below the long one.
    DeathCross,
    /// MACD line crosses above its signal line.
    MacdBullishCross,
    /// MACD line crosses below its signal line.
    MacdBearishCross,
    /// RSI enters the overbought zone.
    Overbought,
    /// RSI enters the oversold zone.
    Oversold,
}

impl SignalKind {
    /// Key of the human-readable description template.
    pub fn template_key(&self) -> &'static str {
        match self {
            SignalKind::GoldenCross => "signal.golden_cross",
            SignalKind::DeathCross => "signal.death_cross",
            SignalKind::MacdBullishCross => "signal.macd_bullish_cross",
            SignalKind::MacdBearishCross => "signal.macd_bearish_cross",
            SignalKind::Overbought => "signal.rsi_overbought",
            SignalKind::Oversold => "signal.rsi_oversold",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::GoldenCross => "Golden cross",
            SignalKind::DeathCross => "Death cross",
            SignalKind::MacdBullishCross => "MACD bullish cross",
            SignalKind::MacdBearishCross => "MACD bearish cross",
            SignalKind::Overbought => "RSI overbought",
            SignalKind::Oversold => "RSI oversold",
        };
        write!(f, "{}", s)
    }
}

/// Indicator value that contributed to a signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalTrigger {
    /// Indicator instance label, e.g. `"MA(10)"`.
    pub indicator: String,
    /// Output line name.
    pub line: String,
    pub value: f64,
}

/// A discrete event detected on the series timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEvent {
    /// Date of the bar on which the event fired.
    pub date: NaiveDate,
    /// Index of that bar in the series.
    pub index: usize,
    pub kind: SignalKind,
    pub triggers: Vec<SignalTrigger>,
    /// Description template key for the presentation layer.
    pub template: &'static str,
}

impl SignalEvent {
    pub fn new(date: NaiveDate, index: usize, kind: SignalKind, triggers: Vec<SignalTrigger>) -> Self {
        Self {
            date,
            index,
            kind,
            triggers,
            template: kind.template_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering_follows_declaration() {
        let mut kinds = vec![SignalKind::Oversold, SignalKind::DeathCross, SignalKind::GoldenCross];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![SignalKind::GoldenCross, SignalKind::DeathCross, SignalKind::Oversold]
        );
    }

    #[test]
    fn test_event_carries_template_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let event = SignalEvent::new(date, 4, SignalKind::DeathCross, vec![]);

        assert_eq!(event.template, "signal.death_cross");
        assert_eq!(serde_json::to_value(&event).unwrap()["kind"], "death_cross");
    }
}
