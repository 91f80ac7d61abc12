//! Per-subsystem configuration, loadable from TOML. Every field has a
//! default, so a missing or partial file is never an error.

pub mod admission_config;
pub mod consensus_config;
pub mod defaults;
pub mod search_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use admission_config::{AdmissionConfig, RoutePolicy};
pub use consensus_config::ConsensusConfig;
pub use search_config::SearchConfig;
pub use storage_config::StorageConfig;

use crate::errors::{StockError, StockResult};

/// Top-level configuration for the whole system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub consensus: ConsensusConfig,
    pub search: SearchConfig,
    pub admission: AdmissionConfig,
    pub storage: StorageConfig,
}

impl StockConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> StockResult<Self> {
        toml::from_str(text).map_err(|e| StockError::ConfigError {
            detail: e.to_string(),
        })
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> StockResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StockError::ConfigError {
            detail: format!("read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }
}
