//! Core data types for the analysis system.

mod indicator;
mod ohlcv;
mod series;
mod signal;
mod timeframe;

pub use indicator::{IndicatorRequest, IndicatorSpec, ParamSpec, Params, PlotType};
pub use ohlcv::{Bar, BarSeries};
pub use series::{first_defined, zip_with, IndicatorResult, Line, Series};
pub use signal::{SignalEvent, SignalKind, SignalTrigger};
pub use timeframe::Timeframe;
