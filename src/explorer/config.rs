//! Configuration of the explorer diff tool.

use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::Deserialize;
use thiserror::Error;
use crate::types::Endpoint;

#[derive(Error, Debug)]
pub enum ExplorerConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// The two explorer services to compare and the height range to walk
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ExplorerDiffConfig {
    pub left: Endpoint,
    pub right: Endpoint,
    /// First height compared
    #[serde(default = "default_start_height")]
    pub start_height: u64,
    /// Last height compared; the walk follows the chain forever when unset
    #[serde(default)]
    pub end_height: Option<u64>,
    /// Delay before polling again for a height that is not available yet
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_rpc_timeout_seconds")]
    pub rpc_timeout_seconds: u64,
}

fn default_start_height() -> u64 {
    1
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_rpc_timeout_seconds() -> u64 {
    30
}

impl ExplorerDiffConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExplorerConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ExplorerConfigError> {
        let config: ExplorerDiffConfig = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ExplorerConfigError> {
        if self.left == self.right {
            return Err(ExplorerConfigError::ValidationError(
                "Left and Right must be different services".into(),
            ));
        }
        if let Some(end) = self.end_height {
            if end < self.start_height {
                return Err(ExplorerConfigError::ValidationError(
                    "EndHeight must not be below StartHeight".into(),
                ));
            }
        }
        if self.poll_interval_ms == 0 {
            return Err(ExplorerConfigError::ValidationError(
                "Poll interval must be positive".into(),
            ));
        }
        if self.rpc_timeout_seconds == 0 {
            return Err(ExplorerConfigError::ValidationError(
                "RPC timeout must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }
}
