//! Environment overrides
//!
//! Recognised variables: `IMPORT_BATCH_SIZE`, `IMPORT_BATCH_DELAY_MS`,
//! `IMPORT_CONFIRM_THRESHOLD`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
//! `LOG_LEVEL`, `LOG_JSON`.

use super::Config;
use crate::utils::error::{ImportError, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply environment variable overrides on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(batch_size) = parse_var(&lookup, "IMPORT_BATCH_SIZE")? {
            self.import.batch_size = batch_size;
        }
        if let Some(delay) = parse_var(&lookup, "IMPORT_BATCH_DELAY_MS")? {
            self.import.batch_delay_ms = delay;
        }
        if let Some(threshold) = parse_var(&lookup, "IMPORT_CONFIRM_THRESHOLD")? {
            self.import.confirm_threshold = threshold;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max_conn) = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            self.database.max_connections = max_conn;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = parse_var(&lookup, "LOG_JSON")? {
            self.logging.json = json;
        }

        debug!("Environment overrides applied");
        Ok(self)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ImportError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
