//! Logging and diagnostics setup.

mod logging;

pub use logging::{setup_logging, LoggingGuard};
