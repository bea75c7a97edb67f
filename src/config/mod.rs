//! Configuration for the tally ledger
//!
//! One TOML file (`~/.tally/config.toml` by default) holding the storage
//! directory and the difficulty catalog. The catalog and the identifier
//! scheme are configuration, not hard-coded variants: communities can
//! rename tiers or change point values without touching code.

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogError, DifficultyCatalog};

/// One difficulty tier in configuration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Difficulty label (matched case-insensitively on submit)
    pub label: String,

    /// Points per completed level of this tier
    pub points: i64,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the three durable ledger records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Difficulty catalog, in display order
    #[serde(default = "default_tiers", rename = "tier")]
    pub tiers: Vec<DifficultyTier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tiers: default_tiers(),
        }
    }
}

impl Config {
    /// Build the immutable difficulty catalog from the configured tiers.
    ///
    /// Fails on duplicate labels or negative point values so a bad config
    /// is rejected at startup, before any submission is scored.
    pub fn catalog(&self) -> Result<DifficultyCatalog, CatalogError> {
        DifficultyCatalog::new(self.tiers.iter().map(|t| (t.label.clone(), t.points)))
    }
}

fn default_data_dir() -> PathBuf {
    Config::global_config_dir().join("data")
}

fn default_tiers() -> Vec<DifficultyTier> {
    DifficultyCatalog::default_tiers()
        .map(|(label, points)| DifficultyTier {
            label: label.to_string(),
            points,
        })
        .collect()
}
