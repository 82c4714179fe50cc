//! # Node Configuration
//!
//! Ledger and storage settings. Defaults, then an optional JSON file, then
//! environment overrides.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DL_SEAL_INTERVAL_MS` | `ledger.seal_interval` |
//! | `DL_SEAL_THRESHOLD` | `ledger.seal_threshold` |
//! | `DL_SEAL_ON_SHUTDOWN` | `ledger.seal_on_shutdown` |
//! | `DL_CHAIN_PATH` | `storage.chain_path` |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use dl_02_pending_pool::PoolConfig;
use serde::Deserialize;
use thiserror::Error;

/// Sealing parameters of the running ledger.
pub type LedgerConfig = PoolConfig;

pub const ENV_SEAL_INTERVAL_MS: &str = "DL_SEAL_INTERVAL_MS";
pub const ENV_SEAL_THRESHOLD: &str = "DL_SEAL_THRESHOLD";
pub const ENV_SEAL_ON_SHUTDOWN: &str = "DL_SEAL_ON_SHUTDOWN";
pub const ENV_CHAIN_PATH: &str = "DL_CHAIN_PATH";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub ledger: LedgerConfig,
    pub storage: StorageConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the whole chain.
    pub chain_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            chain_path: PathBuf::from("blockchain.json"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("seal_interval must be greater than zero")]
    ZeroSealInterval,

    #[error("seal_threshold must be at least 1")]
    ZeroSealThreshold,

    #[error("chain_path must not be empty")]
    EmptyChainPath,
}

impl NodeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `DL_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SEAL_INTERVAL_MS) {
            let millis = parse_number(ENV_SEAL_INTERVAL_MS, &value)?;
            self.ledger.seal_interval = Duration::from_millis(millis);
        }
        if let Some(value) = lookup(ENV_SEAL_THRESHOLD) {
            self.ledger.seal_threshold = parse_number(ENV_SEAL_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_SEAL_ON_SHUTDOWN) {
            self.ledger.seal_on_shutdown = parse_flag(ENV_SEAL_ON_SHUTDOWN, &value)?;
        }
        if let Some(value) = lookup(ENV_CHAIN_PATH) {
            self.storage.chain_path = PathBuf::from(value);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.seal_interval.is_zero() {
            return Err(ConfigError::ZeroSealInterval);
        }
        if self.ledger.seal_threshold == 0 {
            return Err(ConfigError::ZeroSealThreshold);
        }
        if self.storage.chain_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyChainPath);
        }
        Ok(())
    }
}

/// Values outside `T`'s range are rejected, never truncated.
fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}
