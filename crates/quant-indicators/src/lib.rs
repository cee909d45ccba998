//! Technical indicators and the engine that computes them.
//!
//! This crate provides:
//! - Numeric kernels over date-aligned series (SMA, EMA, RSI, MACD, KDJ)
//! - The built-in indicator definitions and their parameter schemas
//! - An immutable [`IndicatorRegistry`] keyed by identifier
//! - The [`IndicatorEngine`], which validates and computes batches of requests
//!
//! Every output has one entry per input bar; positions without enough
//! history are `None`, never zero.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod registry;

pub use engine::{ComputeOutput, IndicatorEngine};
pub use momentum::{Kdj, KdjParams, Macd, MacdParams, Rsi};
pub use moving_average::{Ema, Sma};
pub use registry::{IndicatorRegistry, RegisteredIndicator, RegistryBuilder};
