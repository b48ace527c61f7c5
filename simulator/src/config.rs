//! Configuration loader and validator for the wallet simulator.
//! Handles parsing, validation, and access to the simulation configuration file.

use serde::Deserialize;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use walletsim::types::Endpoint;

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for simulation parameters.
///
/// Loaded once at startup and never modified afterwards. Amounts, fees and thresholds
/// are in atomic units; every `Minimum*`/`Maximum*` pair is an inclusive range.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Connection details of every wallet in the pool
    pub wallets: Vec<WalletConfig>,
    pub minimum_fee: u64,
    pub maximum_fee: u64,
    pub minimum_amount: u64,
    pub maximum_amount: u64,
    pub min_anonymity: u16,
    pub max_anonymity: u16,
    pub min_fusion_threshold: u64,
    pub max_fusion_threshold: u64,
    /// Chance in percent (0-100) that a round sends a fusion transaction
    #[serde(rename = "FusionPropability", alias = "FusionProbability")]
    pub fusion_probability: u32,
    /// Target submission rate; rounds are spaced by `60 / TransactionsPerMinute` seconds
    pub transactions_per_minute: f64,
    /// Whether every wallet is reset before the first round
    pub reset_on_start: bool,
    /// How senders and receivers of standard transactions are chosen
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    /// How the pause between rounds is computed
    #[serde(default)]
    pub pacing: PacingMode,
    /// Unlock time attached to every standard transaction
    #[serde(default)]
    pub unlock_time: u64,
    /// Timeout of a single wallet RPC call
    #[serde(default = "default_rpc_timeout_seconds")]
    pub rpc_timeout_seconds: u64,
    /// Seed for reproducible runs; drawn from entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Connection details of one wallet service
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WalletConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl WalletConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }
}

/// Sender/receiver selection for standard transactions
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Richest wallet sends to the poorest one, pulling balances back together
    #[default]
    Ranked,
    /// Sender and receiver drawn uniformly, never the same wallet
    Random,
}

/// Inter-round pause strategy
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum PacingMode {
    /// Fixed pause after each round's work
    #[default]
    Fixed,
    /// Rounds fire on a fixed schedule; time spent working is taken out of the pause
    Deadline,
}

fn default_rpc_timeout_seconds() -> u64 {
    30
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

fn validate_range<T: PartialOrd + std::fmt::Display>(
    name: &str,
    min: T,
    max: T,
) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::ValidationError(format!(
            "Minimum {} ({}) must not exceed maximum {} ({})",
            name, min, name, max
        )));
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wallets.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "The simulation expects at least 2 wallets, got {}",
                self.wallets.len()
            )));
        }
        validate_range("fee", self.minimum_fee, self.maximum_fee)?;
        validate_range("amount", self.minimum_amount, self.maximum_amount)?;
        validate_range("anonymity", self.min_anonymity, self.max_anonymity)?;
        validate_range("fusion threshold", self.min_fusion_threshold, self.max_fusion_threshold)?;
        if self.minimum_amount == 0 {
            return Err(ConfigError::ValidationError("Minimum amount must be positive".into()));
        }
        if self.min_fusion_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "Minimum fusion threshold must be positive".into(),
            ));
        }
        if self.fusion_probability > 100 {
            return Err(ConfigError::ValidationError(
                "Fusion probability must be between 0 and 100".into(),
            ));
        }
        if !self.transactions_per_minute.is_finite() || self.transactions_per_minute <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Transactions per minute must be positive".into(),
            ));
        }
        if Duration::try_from_secs_f64(60.0 / self.transactions_per_minute).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Transactions per minute ({}) is too small to schedule rounds",
                self.transactions_per_minute
            )));
        }
        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError("RPC timeout must be positive".into()));
        }
        Ok(())
    }

    /// Pause between two rounds, `60 / TransactionsPerMinute` seconds.
    /// Saturates for rates `validate()` would reject.
    pub fn round_interval(&self) -> Duration {
        Duration::try_from_secs_f64(60.0 / self.transactions_per_minute).unwrap_or(Duration::MAX)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    pub fn fee_range(&self) -> RangeInclusive<u64> {
        self.minimum_fee..=self.maximum_fee
    }

    pub fn amount_range(&self) -> RangeInclusive<u64> {
        self.minimum_amount..=self.maximum_amount
    }

    pub fn anonymity_range(&self) -> RangeInclusive<u16> {
        self.min_anonymity..=self.max_anonymity
    }

    pub fn fusion_threshold_range(&self) -> RangeInclusive<u64> {
        self.min_fusion_threshold..=self.max_fusion_threshold
    }
}
