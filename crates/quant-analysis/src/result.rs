//! The assembled analysis result.

use indexmap::IndexMap;
use serde::Serialize;

use quant_core::error::{IndicatorError, QuantResult};
use quant_core::types::{BarSeries, IndicatorResult, SignalEvent};
use quant_indicators::ComputeOutput;

/// Everything one analysis produced, handed as-is to the presentation layer.
///
/// Carries no formatting concerns; [`AnalysisResult::summary`] is a plain
/// text digest for terminals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub series: BarSeries,
    /// Successful indicator outputs keyed by label, in request order.
    pub indicators: IndexMap<String, IndicatorResult>,
    /// Per-request failures keyed by label.
    pub errors: IndexMap<String, IndicatorError>,
    /// Events ordered by date, then kind.
    pub signals: Vec<SignalEvent>,
}

impl AnalysisResult {
    /// Merge the parts into one result. Performs no computation.
    pub fn assemble(series: BarSeries, output: ComputeOutput, signals: Vec<SignalEvent>) -> Self {
        Self {
            series,
            indicators: output.results,
            errors: output.errors,
            signals,
        }
    }

    pub fn indicator(&self, label: &str) -> Option<&IndicatorResult> {
        self.indicators.get(label)
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> QuantResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "  ANALYSIS: {} ({})\n",
            self.series.symbol(),
            self.series.timeframe()
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("SERIES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Bars:                {}\n", self.series.len()));
        if let (Some(first), Some(last)) = (self.series.get(0), self.series.last()) {
            s.push_str(&format!(
                "  Range:               {} .. {}\n",
                first.date(),
                last.date()
            ));
            s.push_str(&format!("  Last Close:          {:.2}\n", last.close()));
        }
        s.push('\n');

        s.push_str("INDICATORS (latest)\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for (label, result) in &self.indicators {
            let latest: Vec<String> = result
                .lines
                .iter()
                .map(|line| match line.values.last().copied().flatten() {
                    Some(v) => format!("{}={:.2}", line.name, v),
                    None => format!("{}=n/a", line.name),
                })
                .collect();
            s.push_str(&format!("  {:<20} {}\n", label, latest.join("  ")));
        }
        for (label, error) in &self.errors {
            s.push_str(&format!("  {:<20} FAILED: {}\n", label, error));
        }
        s.push('\n');

        s.push_str(&format!("SIGNALS ({})\n", self.signals.len()));
        s.push_str("───────────────────────────────────────────────────────────\n");
        for event in &self.signals {
            let triggers: Vec<String> = event
                .triggers
                .iter()
                .map(|t| format!("{}={:.2}", t.indicator, t.value))
                .collect();
            s.push_str(&format!(
                "  {}  {:<20} {}\n",
                event.date,
                event.kind.to_string(),
                triggers.join(" vs ")
            ));
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s
    }
}
