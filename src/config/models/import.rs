//! Import pipeline configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for the batch executor and the pre-flight confirmation gate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportSettings {
    /// Rows per bulk insert
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Fixed pause between consecutive batches, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    /// Imports with more rows than this need explicit confirmation
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            confirm_threshold: default_confirm_threshold(),
        }
    }
}

impl ImportSettings {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_confirm_threshold(mut self, threshold: usize) -> Self {
        self.confirm_threshold = threshold;
        self
    }

    /// Whether an import of `total` rows must be confirmed before it touches storage
    pub fn requires_confirmation(&self, total: usize) -> bool {
        total > self.confirm_threshold
    }
}
