//! Analysis facade.
//!
//! [`Analyzer::analyze`] runs the whole pipeline for one bar series:
//! indicator engine, then signal engine, then the result assembler. The
//! caller performs all I/O before and after.

pub mod analyzer;
pub mod result;

pub use analyzer::Analyzer;
pub use result::AnalysisResult;

pub use quant_signals::SignalConfig;
