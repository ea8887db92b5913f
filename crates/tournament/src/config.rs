//! CLI configuration loaded from `tournament.toml`

use pairing_core::Margin;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::DEFAULT_DATA_FILE;

/// Config file the CLI looks for when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tournament.toml";

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Roster and match log file
    pub data_file: PathBuf,
    /// Maximum score difference for a pairing
    pub margin: Margin,
    /// Fixed shuffle seed for reproducible rounds
    pub seed: Option<u64>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            margin: Margin::default(),
            seed: None,
            log_filter: "info".to_string(),
        }
    }
}

impl TournamentConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
