//! Indicator registry for lookup by identifier.

use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use quant_core::error::IndicatorError;
use quant_core::traits::Indicator;
use quant_core::types::IndicatorSpec;

use crate::{Ema, Kdj, Macd, Rsi, Sma};

/// A registered indicator: its metadata and its computation.
#[derive(Clone)]
pub struct RegisteredIndicator {
    pub spec: IndicatorSpec,
    pub indicator: Arc<dyn Indicator>,
}

impl std::fmt::Debug for RegisteredIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredIndicator")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Immutable mapping from indicator identifier to its computation.
///
/// Built once at startup and only read afterwards, so concurrent lookups
/// need no locking. Identifiers are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    indicators: IndexMap<String, RegisteredIndicator>,
}

impl IndicatorRegistry {
    /// Create a registry with all built-in indicators.
    ///
    /// Built-ins go through the same checks as any other registration.
    pub fn new() -> Self {
        let mut builder = RegistryBuilder::empty();
        for (spec, indicator) in builtins() {
            let id = spec.id.clone();
            if let Err(e) = builder.insert(spec, indicator) {
                warn!(indicator = %id, error = %e, "Skipping built-in indicator");
            }
        }
        builder.build()
    }

    /// Process-wide registry of the built-in indicators.
    pub fn global() -> &'static IndicatorRegistry {
        static GLOBAL: OnceLock<IndicatorRegistry> = OnceLock::new();
        GLOBAL.get_or_init(IndicatorRegistry::new)
    }

    /// Start composing a registry from the built-in indicators.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            registry: Self::new(),
        }
    }

    /// Look up an indicator by identifier.
    pub fn resolve(&self, id: &str) -> Result<&RegisteredIndicator, IndicatorError> {
        self.indicators
            .get(&id.to_uppercase())
            .ok_or_else(|| IndicatorError::UnknownIndicator {
                indicator: id.to_string(),
            })
    }

    /// List all indicator specs in registration order.
    pub fn list_all(&self) -> Vec<&IndicatorSpec> {
        self.indicators.values().map(|r| &r.spec).collect()
    }

    /// Check if an indicator exists.
    pub fn contains(&self, id: &str) -> bool {
        self.indicators.contains_key(&id.to_uppercase())
    }

    /// Number of registered indicators.
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtins() -> Vec<(IndicatorSpec, Arc<dyn Indicator>)> {
    vec![
        (Sma::spec(), Arc::new(Sma) as Arc<dyn Indicator>),
        (Ema::spec(), Arc::new(Ema) as Arc<dyn Indicator>),
        (Macd::spec(), Arc::new(Macd) as Arc<dyn Indicator>),
        (Rsi::spec(), Arc::new(Rsi) as Arc<dyn Indicator>),
        (Kdj::spec(), Arc::new(Kdj) as Arc<dyn Indicator>),
    ]
}

/// Composition-time registry builder.
///
/// The only place indicators can be added; [`RegistryBuilder::build`]
/// freezes the result.
#[derive(Debug)]
pub struct RegistryBuilder {
    registry: IndicatorRegistry,
}

impl RegistryBuilder {
    /// Start from an empty registry, without built-ins.
    pub fn empty() -> Self {
        Self {
            registry: IndicatorRegistry {
                indicators: IndexMap::new(),
            },
        }
    }

    /// Register an indicator under its spec's identifier.
    pub fn register(
        &mut self,
        spec: IndicatorSpec,
        indicator: impl Indicator + 'static,
    ) -> Result<&mut Self, IndicatorError> {
        self.insert(spec, Arc::new(indicator))
    }

    fn insert(
        &mut self,
        spec: IndicatorSpec,
        indicator: Arc<dyn Indicator>,
    ) -> Result<&mut Self, IndicatorError> {
        let key = spec.id.to_uppercase();
        if key.is_empty() {
            return Err(IndicatorError::invalid(&spec.id, "identifier must not be empty"));
        }
        if self.registry.indicators.contains_key(&key) {
            return Err(IndicatorError::DuplicateIndicator { indicator: spec.id });
        }
        if spec.outputs.is_empty() {
            return Err(IndicatorError::invalid(&spec.id, "at least one output line required"));
        }
        for param in &spec.params {
            param.check(&spec.id, param.default)?;
        }

        info!(indicator = %spec.id, outputs = spec.arity(), "Indicator registered");
        self.registry.indicators.insert(
            key,
            RegisteredIndicator { spec, indicator },
        );
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> IndicatorRegistry {
        self.registry
    }
}
