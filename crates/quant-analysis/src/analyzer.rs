//! Analysis facade over the indicator and signal engines.

use tracing::{debug, info};

use quant_core::error::QuantResult;
use quant_core::types::{BarSeries, IndicatorRequest, IndicatorSpec};
use quant_indicators::{IndicatorEngine, IndicatorRegistry};
use quant_signals::{SignalConfig, SignalEngine, SignalInputs};

use crate::result::AnalysisResult;

/// Entry point for embedding services.
///
/// Holds only a shared reference to an immutable registry, so any number of
/// analyses can run concurrently without coordination.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'r> {
    registry: &'r IndicatorRegistry,
}

impl Analyzer<'static> {
    /// Analyzer over the process-wide built-in registry.
    pub fn global() -> Self {
        Self::new(IndicatorRegistry::global())
    }
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'r> Analyzer<'r> {
    pub fn new(registry: &'r IndicatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r IndicatorRegistry {
        self.registry
    }

    /// Specs of every registered indicator, in registration order.
    pub fn list_indicators(&self) -> Vec<&'r IndicatorSpec> {
        self.registry.list_all()
    }

    /// Compute the requested indicators and detect signals.
    ///
    /// Fails only on an invalid `signals` configuration. Per-indicator
    /// failures are reported inside the result, and indicators required by
    /// enabled signal rules are added to the batch when missing.
    pub fn analyze(
        &self,
        series: &BarSeries,
        requests: &[IndicatorRequest],
        signals: &SignalConfig,
    ) -> QuantResult<AnalysisResult> {
        signals.validate()?;

        let engine = IndicatorEngine::new(self.registry);
        let mut batch = requests.to_vec();
        let mut added = 0usize;
        for required in signals.required_requests() {
            let label = engine.label(&required);
            if !batch.iter().any(|r| engine.label(r) == label) {
                batch.push(required);
                added += 1;
            }
        }
        if added > 0 {
            debug!(added, "Added indicators required by signal rules");
        }

        let output = engine.compute(series, &batch);

        let ma_short_label = engine.label(&signals.ma_cross.short_request());
        let ma_long_label = engine.label(&signals.ma_cross.long_request());
        let rsi_label = engine.label(&signals.rsi_alert.request());
        let macd_label = engine.label(&signals.macd_cross.request());
        let inputs = SignalInputs {
            ma_short: output.get(&ma_short_label),
            ma_long: output.get(&ma_long_label),
            rsi: output.get(&rsi_label),
            macd: output.get(&macd_label),
        };
        let events = SignalEngine::new(signals.clone()).detect(series, &inputs);

        info!(
            symbol = series.symbol(),
            bars = series.len(),
            indicators = output.results.len(),
            failed = output.errors.len(),
            signals = events.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult::assemble(series.clone(), output, events))
    }
}
