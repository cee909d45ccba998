//! Indicator metadata, parameter schemas and requests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::IndicatorError;

/// How the presentation layer should draw an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// Drawn on top of the price chart (moving averages).
    Overlay,
    /// Drawn in its own pane (MACD, RSI, KDJ).
    Oscillator,
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotType::Overlay => write!(f, "overlay"),
            PlotType::Oscillator => write!(f, "oscillator"),
        }
    }
}

/// Schema for one named numeric parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    /// Whether only whole numbers are accepted.
    pub integer: bool,
}

impl ParamSpec {
    /// An integer parameter with an inclusive valid range.
    pub fn integer(name: &str, description: &str, default: usize, min: usize, max: usize) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            default: default as f64,
            min: min as f64,
            max: max as f64,
            integer: true,
        }
    }

    /// Check a supplied value against the schema.
    pub fn check(&self, indicator: &str, value: f64) -> Result<f64, IndicatorError> {
        if !value.is_finite() {
            return Err(IndicatorError::invalid(
                indicator,
                format!("{} must be a finite number", self.name),
            ));
        }
        if self.integer && value.fract() != 0.0 {
            return Err(IndicatorError::invalid(
                indicator,
                format!("{} must be an integer, got {}", self.name, value),
            ));
        }
        if value < self.min || value > self.max {
            return Err(IndicatorError::invalid(
                indicator,
                format!(
                    "{} = {} is outside [{}, {}]",
                    self.name, value, self.min, self.max
                ),
            ));
        }
        Ok(value)
    }
}

/// Static description of a registered indicator.
///
/// This is what `list_indicators` hands to front-ends for building
/// selection controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSpec {
    /// Registry key, e.g. `"MACD"`.
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub plot_type: PlotType,
    pub params: Vec<ParamSpec>,
    /// Output line names, in output order.
    pub outputs: Vec<String>,
}

impl IndicatorSpec {
    /// Create a spec with no parameters and no outputs yet.
    pub fn new(id: &str, display_name: &str, plot_type: PlotType) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: String::new(),
            plot_type,
            params: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn output(mut self, name: &str) -> Self {
        self.outputs.push(name.to_string());
        self
    }

    /// Number of output lines.
    pub fn arity(&self) -> usize {
        self.outputs.len()
    }

    /// Resolve raw request parameters against the schema.
    ///
    /// Unknown names and out-of-range values are rejected; missing
    /// parameters take their defaults. The returned parameters follow
    /// schema order.
    pub fn resolve(&self, raw: &BTreeMap<String, f64>) -> Result<Params, IndicatorError> {
        if let Some(unknown) = raw
            .keys()
            .find(|name| !self.params.iter().any(|p| &p.name == *name))
        {
            return Err(IndicatorError::invalid(
                &self.id,
                format!("unknown parameter '{}'", unknown),
            ));
        }

        let mut values = IndexMap::with_capacity(self.params.len());
        for param in &self.params {
            let value = match raw.get(&param.name) {
                Some(&v) => param.check(&self.id, v)?,
                None => param.default,
            };
            values.insert(param.name.clone(), value);
        }

        Ok(Params { values })
    }
}

/// Fully resolved indicator parameters, in schema order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: IndexMap<String, f64>,
}

impl Params {
    /// Look up a parameter value.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Look up a whole-number parameter such as a period.
    pub fn usize(&self, indicator: &str, name: &str) -> Result<usize, IndicatorError> {
        match self.get(name) {
            Some(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as usize),
            Some(v) => Err(IndicatorError::invalid(
                indicator,
                format!("{} must be a non-negative integer, got {}", name, v),
            )),
            None => Err(IndicatorError::invalid(
                indicator,
                format!("missing parameter '{}'", name),
            )),
        }
    }

    /// Iterate over `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Canonical label for an indicator instance, e.g. `MACD(12,26,9)`.
    pub fn label(&self, id: &str) -> String {
        if self.values.is_empty() {
            return id.to_string();
        }
        let args: Vec<String> = self.values.values().map(|v| v.to_string()).collect();
        format!("{}({})", id, args.join(","))
    }
}

/// A caller's request for one indicator with raw parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub id: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl IndicatorRequest {
    /// Request an indicator with default parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: BTreeMap::new(),
        }
    }

    /// Set a raw parameter value.
    pub fn with_param(mut self, name: &str, value: f64) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    /// Parse one request such as `"MACD:fast=8,slow=21"`.
    pub fn parse(s: &str) -> Result<Self, IndicatorError> {
        s.parse()
    }

    /// Parse a list such as `"MA:period=5; MACD; RSI:period=9"`.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, IndicatorError> {
        s.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for IndicatorRequest {
    type Err = IndicatorError;

    /// Parse `ID` or `ID:name=value,name=value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, rest) = match s.split_once(':') {
            Some((id, rest)) => (id.trim(), rest),
            None => (s.trim(), ""),
        };
        if id.is_empty() {
            return Err(IndicatorError::UnknownIndicator {
                indicator: s.to_string(),
            });
        }

        let mut request = IndicatorRequest::new(id.to_uppercase());
        for pair in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| IndicatorError::invalid(id, format!("expected name=value, got '{}'", pair)))?;
            let value: f64 = value.trim().parse().map_err(|_| {
                IndicatorError::invalid(id, format!("'{}' is not a number", value.trim()))
            })?;
            request.params.insert(name.trim().to_string(), value);
        }
        Ok(request)
    }
}

impl fmt::Display for IndicatorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{}", self.id);
        }
        let args: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{}({})", self.id, args.join(","))
    }
}
