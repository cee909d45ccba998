//! Logging setup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quant_config::{LogFormat, LoggingConfig};
use quant_core::error::{QuantError, QuantResult};

/// Keeps the file writer alive; logs are flushed when it is dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. When a log file
/// is configured, plain-text output is also written there through a
/// non-blocking writer.
pub fn setup_logging(config: &LoggingConfig) -> QuantResult<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| QuantError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let (dir, name) = split_log_path(Path::new(path))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    let installed = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    };
    installed.map_err(|e| QuantError::Config(format!("failed to install logger: {}", e)))?;

    info!(
        level = %config.level,
        format = ?config.format,
        file = config.file.as_deref().unwrap_or("-"),
        "Logging initialized"
    );
    Ok(LoggingGuard { _file: guard })
}

fn split_log_path(path: &Path) -> QuantResult<(PathBuf, OsString)> {
    let name = path
        .file_name()
        .ok_or_else(|| QuantError::Config(format!("log file path has no file name: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name.to_os_string()))
}
