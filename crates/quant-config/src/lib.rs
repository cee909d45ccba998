//! Configuration management.

mod settings;

pub use settings::{AnalysisSettings, AppConfig, AppSettings, LogFormat, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// The file is optional; environment variables such as
/// `QUANT__ANALYSIS__MAX_BARS=2000` override it.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("QUANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/no/such/quant.toml")).unwrap();
        assert_eq!(config.analysis.max_bars, AnalysisSettings::default().max_bars);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("quant-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
            [logging]
            level = "debug"

            [analysis]
            max_bars = 750
            default_indicators = ["MA:period=20", "KDJ"]

            [analysis.signals.rsi_alert]
            upper = 80.0
            lower = 20.0
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.analysis.max_bars, 750);
        assert_eq!(config.analysis.signals.rsi_alert.upper, 80.0);
        assert_eq!(config.analysis.signals.rsi_alert.period, 14);
        assert_eq!(config.analysis.default_requests().unwrap().len(), 2);
    }
}
