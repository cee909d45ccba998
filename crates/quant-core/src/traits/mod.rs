//! Core traits for the analysis system.

mod bar_source;
mod indicator;

pub use bar_source::BarSource;
pub use indicator::Indicator;
