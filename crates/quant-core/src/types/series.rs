//! Date-aligned indicator output series.

use serde::Serialize;

use super::{Params, PlotType};

/// One value per bar; `None` marks positions that are not yet computable.
pub type Series = Vec<Option<f64>>;

/// Combine two aligned series element-wise.
///
/// A position is defined only where both inputs are defined, so undefined
/// values propagate through dependent calculations.
pub fn zip_with(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Series {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Index of the first defined value, if any.
pub fn first_defined(series: &[Option<f64>]) -> Option<usize> {
    series.iter().position(Option::is_some)
}

/// A named output line of an indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub name: String,
    pub values: Series,
}

impl Line {
    pub fn new(name: impl Into<String>, values: Series) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Output of one indicator computed over a bar series.
///
/// Every line has exactly as many entries as the input series, and entry
/// `i` belongs to bar `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    /// Registry identifier, e.g. `"MA"`.
    pub id: String,
    /// Canonical instance label, e.g. `"MA(5)"`.
    pub label: String,
    pub plot_type: PlotType,
    pub params: Params,
    pub lines: Vec<Line>,
}

impl IndicatorResult {
    /// Get an output line by name.
    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.name == name)
    }

    /// Values of an output line by name.
    pub fn values(&self, name: &str) -> Option<&[Option<f64>]> {
        self.line(name).map(|l| l.values.as_slice())
    }

    /// Values of the first output line.
    pub fn primary(&self) -> Option<&[Option<f64>]> {
        self.lines.first().map(|l| l.values.as_slice())
    }

    /// Length shared by all output lines.
    pub fn len(&self) -> usize {
        self.lines.first().map_or(0, |l| l.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
