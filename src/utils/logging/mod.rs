//! Console logging for the planner CLI
//!
//! Library code only emits `tracing` events; installing a subscriber is left to
//! the binary, which calls [`setup_logging`] once after the config is loaded.

mod formatter;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::{Error, Result};
use formatter::CleanFormatter;

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn parse_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Sets up the logging system with the specified configuration
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error); `RUST_LOG` still wins
/// * `show_timestamps` - Whether to show timestamps in console output
/// * `colored` - Whether to use colored output in console
pub fn setup_logging(level: &str, show_timestamps: bool, colored: bool) -> Result<()> {
    let level = parse_level(level).unwrap_or(Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let formatter = CleanFormatter::new(show_timestamps, colored);
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(false)
        .with_writer(std::io::stderr)
        .event_format(formatter);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::validation(format!("Logging already initialised: {}", e)))
}
