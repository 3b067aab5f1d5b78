//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; binaries call [`init_tracing`]
//! once at startup.

use crate::config::LoggingConfig;
use crate::utils::error::{ImportError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` overrides `config.level` when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from_level(&config.level)?,
    };

    let installed = if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init()
    };

    installed.map_err(|e| ImportError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Build a filter from a level or directive string; SQL statement logging is kept at `warn`.
pub fn filter_from_level(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(format!("{},sqlx=warn", level.trim()))
        .map_err(|e| ImportError::Config(format!("Invalid log level '{}': {}", level, e)))
}
