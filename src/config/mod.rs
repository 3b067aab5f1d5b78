//! Configuration management for the importer
//!
//! Settings come from an optional YAML file, then environment overrides,
//! then validation.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the importer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Import pipeline tuning
    #[serde(default)]
    pub import: ImportSettings,
    /// Database connection
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ImportError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from defaults, then apply environment overrides
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.import
            .validate()
            .map_err(|e| ImportError::Config(format!("Import config error: {}", e)))?;

        self.database
            .validate()
            .map_err(|e| ImportError::Config(format!("Database config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| ImportError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ImportError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
