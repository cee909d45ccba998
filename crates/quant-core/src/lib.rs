//! Core types and traits for the analysis system.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Timeframe)
//! - Indicator metadata, parameters and aligned output series
//! - Signal events derived from indicator outputs
//! - Core traits for indicator computations and bar sources

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, QuantError, QuantResult};
pub use traits::*;
pub use types::*;
