//! Indicator engine: resolves requests and computes aligned outputs.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use quant_core::error::IndicatorError;
use quant_core::types::{BarSeries, IndicatorRequest, IndicatorResult};

use crate::registry::IndicatorRegistry;

/// Outcome of computing a batch of indicator requests.
///
/// Successful results and failures are both keyed by request label, in
/// request order. A failed request never prevents its siblings from being
/// computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComputeOutput {
    pub results: IndexMap<String, IndicatorResult>,
    pub errors: IndexMap<String, IndicatorError>,
}

impl ComputeOutput {
    /// Look up a successful result by label, e.g. `"MA(5)"`.
    pub fn get(&self, label: &str) -> Option<&IndicatorResult> {
        self.results.get(label)
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Computes indicator outputs against a read-only registry.
///
/// Stateless: the same series and requests always yield identical outputs.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine<'r> {
    registry: &'r IndicatorRegistry,
}

impl<'r> IndicatorEngine<'r> {
    pub fn new(registry: &'r IndicatorRegistry) -> Self {
        Self { registry }
    }

    /// Canonical label a request resolves to, e.g. `MA(period=10)` -> `MA(10)`.
    ///
    /// Requests that cannot be resolved keep their raw rendering.
    pub fn label(&self, request: &IndicatorRequest) -> String {
        self.registry
            .resolve(&request.id)
            .and_then(|entry| entry.spec.resolve(&request.params).map(|p| p.label(&entry.spec.id)))
            .unwrap_or_else(|_| request.to_string())
    }

    /// Compute every request, collecting per-request failures.
    pub fn compute(&self, series: &BarSeries, requests: &[IndicatorRequest]) -> ComputeOutput {
        let mut output = ComputeOutput::default();

        for request in requests {
            let label = self.label(request);
            if output.results.contains_key(&label) || output.errors.contains_key(&label) {
                debug!(indicator = %label, "Duplicate request skipped");
                continue;
            }

            match self.compute_one(series, request) {
                Ok(result) => {
                    output.results.insert(label, result);
                }
                Err(e) => {
                    warn!(indicator = %label, error = %e, "Indicator computation failed");
                    output.errors.insert(label, e);
                }
            }
        }

        debug!(
            symbol = series.symbol(),
            bars = series.len(),
            computed = output.results.len(),
            failed = output.errors.len(),
            "Indicators computed"
        );
        output
    }

    /// Compute a single request.
    ///
    /// Parameters and series length are validated before any computation,
    /// so a failure never yields partial output.
    pub fn compute_one(
        &self,
        series: &BarSeries,
        request: &IndicatorRequest,
    ) -> Result<IndicatorResult, IndicatorError> {
        let entry = self.registry.resolve(&request.id)?;
        let spec = &entry.spec;

        let params = spec.resolve(&request.params)?;
        entry.indicator.validate(&params)?;
        entry.indicator.validate_data(&spec.id, series, &params)?;

        let lines = entry.indicator.compute(series, &params)?;
        debug_assert_eq!(lines.len(), spec.arity());
        debug_assert!(lines.iter().all(|l| l.values.len() == series.len()));

        Ok(IndicatorResult {
            id: spec.id.clone(),
            label: params.label(&spec.id),
            plot_type: spec.plot_type,
            params,
            lines,
        })
    }
}
