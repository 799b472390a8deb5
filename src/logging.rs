//! Structured logging setup
//!
//! Installs a global `tracing` subscriber from `LoggingConfig`. `RUST_LOG`
//! overrides the configured level when set.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(String),
}

/// Build a filter from a configured level or directive list
pub fn filter_from_level(level: &str) -> Result<EnvFilter, LogError> {
    EnvFilter::try_new(level).map_err(|e| LogError::InvalidFilter(level.to_string(), e.to_string()))
}

/// Initialize the global logging subscriber
///
/// Call once at startup. A second call returns `LogError::SetSubscriber`.
pub fn init(config: &LoggingConfig) -> Result<(), LogError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from_level(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LogError::SetSubscriber(e.to_string()))
}
