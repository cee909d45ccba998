//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use quant_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let signals = &config.analysis.signals;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Max bars: {}", config.analysis.max_bars);
    println!("Default indicators: {}", config.analysis.default_indicators.join("; "));
    println!(
        "MA cross: {} ({}/{})",
        enabled(signals.ma_cross.enabled),
        signals.ma_cross.short,
        signals.ma_cross.long
    );
    println!(
        "RSI alert: {} (RSI({}) > {} / < {})",
        enabled(signals.rsi_alert.enabled),
        signals.rsi_alert.period,
        signals.rsi_alert.upper,
        signals.rsi_alert.lower
    );
    println!(
        "MACD cross: {} ({},{},{})",
        enabled(signals.macd_cross.enabled),
        signals.macd_cross.fast,
        signals.macd_cross.slow,
        signals.macd_cross.signal
    );
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}
