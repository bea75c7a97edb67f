//! CLI command implementations

pub mod graph;
pub mod init;
pub mod leaderboard;
pub mod submit;

use anyhow::{Context, Result};

use tally::config::Config;
use tally::ledger::PointsLedger;
use tally::store::FileStore;

/// Open the ledger backed by the configured data directory
pub(crate) fn open_ledger(config: &Config) -> Result<PointsLedger> {
    let catalog = config
        .catalog()
        .context("Invalid difficulty catalog in config")?;
    let store = FileStore::open(&config.data_dir).with_context(|| {
        format!(
            "Failed to open data directory: {}",
            config.data_dir.display()
        )
    })?;
    PointsLedger::open(catalog, Box::new(store)).context("Failed to load ledger state")
}
