//! Import and logging configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

/// Upper bound on rows per bulk insert
const MAX_BATCH_SIZE: usize = 1000;

/// Upper bound on the inter-batch pause
const MAX_BATCH_DELAY_MS: u64 = 60_000;

impl Validate for ImportSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating import settings");

        if self.batch_size == 0 {
            return Err("Import batch size must be greater than 0".to_string());
        }

        if self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "Import batch size should not exceed {}",
                MAX_BATCH_SIZE
            ));
        }

        if self.batch_delay_ms > MAX_BATCH_DELAY_MS {
            return Err(format!(
                "Import batch delay should not exceed {}ms",
                MAX_BATCH_DELAY_MS
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
