//! Error types for the analysis system.

use serde::Serialize;
use thiserror::Error;

/// Top-level analysis error.
#[derive(Error, Debug)]
pub enum QuantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Bar and bar source errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Invalid bar on {date}: {reason}")]
    InvalidBar { date: String, reason: String },

    #[error("Bars out of order: {current} does not follow {previous}")]
    OutOfOrder { previous: String, current: String },

    #[error("Duplicate bar date: {0}")]
    DuplicateDate(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator registration, validation and calculation errors.
///
/// Failures raised while serving a request are reported per indicator and
/// travel inside the analysis result, hence `Clone` and `Serialize`.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorError {
    #[error("Invalid parameter for {indicator}: {reason}")]
    InvalidParameter { indicator: String, reason: String },

    #[error("Unknown indicator: {indicator}")]
    UnknownIndicator { indicator: String },

    #[error("Insufficient data for {indicator}: need {required} bars, have {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("Indicator already registered: {indicator}")]
    DuplicateIndicator { indicator: String },
}

impl IndicatorError {
    /// Shorthand for an [`IndicatorError::InvalidParameter`].
    pub fn invalid(indicator: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            indicator: indicator.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for analysis operations.
pub type QuantResult<T> = Result<T, QuantError>;
