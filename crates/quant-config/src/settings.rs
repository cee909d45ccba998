//! Configuration structures.

use serde::{Deserialize, Serialize};

use quant_core::error::{QuantError, QuantResult};
use quant_core::types::IndicatorRequest;
use quant_signals::SignalConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Check settings that deserialization alone cannot.
    pub fn validate(&self) -> QuantResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(QuantError::Config("Log level must not be empty".into()));
        }
        self.analysis.validate()
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quant".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Also write logs to this file.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Longest series accepted for one analysis.
    pub max_bars: usize,
    /// Requests used when the caller names none, e.g. `"MACD:fast=8"`.
    pub default_indicators: Vec<String>,
    pub signals: SignalConfig,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_bars: 5000,
            default_indicators: vec!["MA".to_string(), "MACD".to_string(), "RSI".to_string()],
            signals: SignalConfig::default(),
        }
    }
}

impl AnalysisSettings {
    /// Parse `default_indicators` into requests.
    pub fn default_requests(&self) -> QuantResult<Vec<IndicatorRequest>> {
        self.default_indicators
            .iter()
            .map(|s| IndicatorRequest::parse(s).map_err(QuantError::from))
            .collect()
    }

    pub fn validate(&self) -> QuantResult<()> {
        if self.max_bars == 0 {
            return Err(QuantError::Config("max_bars must be greater than 0".into()));
        }
        self.default_requests()?;
        self.signals.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.default_requests().unwrap().len(), 3);
    }

    #[test]
    fn test_unparsable_default_indicator() {
        let mut config = AppConfig::default();
        config.analysis.default_indicators = vec!["MA:period".to_string()];
        assert!(matches!(config.validate(), Err(QuantError::Indicator(_))));
    }

    #[test]
    fn test_invalid_signal_config() {
        let mut config = AppConfig::default();
        config.analysis.signals.macd_cross.fast = 40;
        assert!(matches!(config.validate(), Err(QuantError::Config(_))));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.analysis.signals, config.analysis.signals);
        assert_eq!(parsed.logging.format, LogFormat::Pretty);
    }
}
