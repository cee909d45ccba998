//! Signal detection over computed indicator outputs.
//!
//! Two generic detectors do the work:
//! - [`detect_crossovers`] reports sign changes of `A - B` between consecutive
//!   defined positions
//! - [`detect_threshold_crossings`] reports edge-triggered entries into the
//!   zones above and below a pair of thresholds
//!
//! [`SignalEngine`] maps them onto golden/death crosses of a moving average
//! pair, RSI overbought/oversold alerts and MACD signal-line crosses.

pub mod config;
pub mod crossover;
pub mod engine;
pub mod threshold;

pub use config::{AverageKind, MacdCrossConfig, MaCrossConfig, RsiAlertConfig, SignalConfig};
pub use crossover::{detect_crossovers, Crossover, Direction};
pub use engine::{SignalEngine, SignalInputs};
pub use threshold::{detect_threshold_crossings, ThresholdCrossing, Zone};
