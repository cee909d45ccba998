//! Signal rule configuration.

use serde::{Deserialize, Serialize};

use quant_core::error::{QuantError, QuantResult};
use quant_core::types::IndicatorRequest;

/// Moving average flavour used for the crossover pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageKind {
    #[default]
    Sma,
    Ema,
}

impl AverageKind {
    /// Registry identifier of the matching indicator.
    pub fn indicator_id(&self) -> &'static str {
        match self {
            AverageKind::Sma => "MA",
            AverageKind::Ema => "EMA",
        }
    }
}

/// Golden/death cross rule over a short and a long moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaCrossConfig {
    pub enabled: bool,
    /// Short moving average period
    pub short: usize,
    /// Long moving average period
    pub long: usize,
    pub average: AverageKind,
}

impl Default for MaCrossConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            short: 10,
            long: 30,
            average: AverageKind::Sma,
        }
    }
}

impl MaCrossConfig {
    pub fn short_request(&self) -> IndicatorRequest {
        IndicatorRequest::new(self.average.indicator_id()).with_param("period", self.short as f64)
    }

    pub fn long_request(&self) -> IndicatorRequest {
        IndicatorRequest::new(self.average.indicator_id()).with_param("period", self.long as f64)
    }

    fn validate(&self) -> QuantResult<()> {
        if self.short == 0 {
            return Err(QuantError::Config(
                "MA cross short period must be greater than 0".into(),
            ));
        }
        if self.short >= self.long {
            return Err(QuantError::Config(
                "MA cross short period must be less than long period".into(),
            ));
        }
        Ok(())
    }
}

/// Overbought/oversold alert rule on RSI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiAlertConfig {
    pub enabled: bool,
    /// RSI calculation period
    pub period: usize,
    /// Overbought threshold
    pub upper: f64,
    /// Oversold threshold
    pub lower: f64,
}

impl Default for RsiAlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period: 14,
            upper: 70.0,
            lower: 30.0,
        }
    }
}

impl RsiAlertConfig {
    pub fn request(&self) -> IndicatorRequest {
        IndicatorRequest::new("RSI").with_param("period", self.period as f64)
    }

    fn validate(&self) -> QuantResult<()> {
        if self.period == 0 {
            return Err(QuantError::Config(
                "RSI period must be greater than 0".into(),
            ));
        }
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(QuantError::Config("RSI thresholds must be finite".into()));
        }
        if self.upper <= self.lower {
            return Err(QuantError::Config(
                "RSI upper threshold must be greater than lower threshold".into(),
            ));
        }
        if self.upper > 100.0 || self.lower < 0.0 {
            return Err(QuantError::Config(
                "RSI thresholds must be within [0, 100]".into(),
            ));
        }
        Ok(())
    }
}

/// MACD line versus signal line crossover rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdCrossConfig {
    pub enabled: bool,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdCrossConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdCrossConfig {
    pub fn request(&self) -> IndicatorRequest {
        IndicatorRequest::new("MACD")
            .with_param("fast", self.fast as f64)
            .with_param("slow", self.slow as f64)
            .with_param("signal", self.signal as f64)
    }

    fn validate(&self) -> QuantResult<()> {
        if self.fast == 0 || self.signal == 0 {
            return Err(QuantError::Config(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.fast >= self.slow {
            return Err(QuantError::Config(
                "MACD fast period must be less than slow period".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration of every signal rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub ma_cross: MaCrossConfig,
    pub rsi_alert: RsiAlertConfig,
    pub macd_cross: MacdCrossConfig,
}

impl SignalConfig {
    /// Configuration with only the MA pair rule enabled.
    pub fn ma_cross_only(short: usize, long: usize) -> Self {
        Self {
            ma_cross: MaCrossConfig {
                short,
                long,
                ..MaCrossConfig::default()
            },
            rsi_alert: RsiAlertConfig {
                enabled: false,
                ..RsiAlertConfig::default()
            },
            macd_cross: MacdCrossConfig {
                enabled: false,
                ..MacdCrossConfig::default()
            },
        }
    }

    /// Check every enabled rule. Disabled rules are not validated.
    pub fn validate(&self) -> QuantResult<()> {
        if self.ma_cross.enabled {
            self.ma_cross.validate()?;
        }
        if self.rsi_alert.enabled {
            self.rsi_alert.validate()?;
        }
        if self.macd_cross.enabled {
            self.macd_cross.validate()?;
        }
        Ok(())
    }

    /// Indicator requests the enabled rules read from.
    pub fn required_requests(&self) -> Vec<IndicatorRequest> {
        let mut requests = Vec::new();
        if self.ma_cross.enabled {
            requests.push(self.ma_cross.short_request());
            requests.push(self.ma_cross.long_request());
        }
        if self.rsi_alert.enabled {
            requests.push(self.rsi_alert.request());
        }
        if self.macd_cross.enabled {
            requests.push(self.macd_cross.request());
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SignalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rsi_alert.upper, 70.0);
        assert_eq!(config.rsi_alert.lower, 30.0);
    }

    #[test]
    fn test_ma_cross_validation() {
        let mut config = SignalConfig::default();
        config.ma_cross.short = 30;
        config.ma_cross.long = 10;
        assert!(matches!(config.validate(), Err(QuantError::Config(_))));

        config.ma_cross.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rsi_threshold_validation() {
        let mut config = SignalConfig::default();
        config.rsi_alert.upper = 20.0;
        assert!(config.validate().is_err());

        config.rsi_alert.upper = 120.0;
        assert!(config.validate().is_err());

        config.rsi_alert.upper = 80.0;
        config.rsi_alert.lower = 20.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SignalConfig = toml::from_str(
            r#"
            [ma_cross]
            short = 5
            long = 20
            average = "ema"

            [macd_cross]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.ma_cross.short, 5);
        assert_eq!(config.ma_cross.average, AverageKind::Ema);
        assert_eq!(config.ma_cross.short_request().id, "EMA");
        assert_eq!(config.rsi_alert, RsiAlertConfig::default());
        assert!(!config.macd_cross.enabled);
        assert_eq!(config.macd_cross.slow, 26);
    }

    #[test]
    fn test_required_requests_follow_enabled_rules() {
        let config = SignalConfig::ma_cross_only(2, 3);
        let rendered: Vec<String> = config
            .required_requests()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["MA(period=2)", "MA(period=3)"]);

        let ids: Vec<String> = SignalConfig::default()
            .required_requests()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["MA", "MA", "RSI", "MACD"]);
    }
}
