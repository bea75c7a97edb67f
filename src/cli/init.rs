//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use tally::config::Config;

/// Default configuration content for tally init
pub const DEFAULT_CONFIG: &str = r#"# Tally Configuration
# ===================
#
# The ledger records live as three JSON files under data_dir:
# totals.json, daily_deltas.json and submission_log.json.
# Only one tally process may write to a data_dir at a time.

# data_dir = "/var/lib/tally"

# ============================================================================
# TIERS - The difficulty catalog
# ============================================================================
#
# Each completed level of a tier is worth `points`. Labels are matched
# case-insensitively on submit. Labels must be unique and points must not
# be negative; tally refuses to start otherwise.

[[tier]]
label = "easy"
points = 1

[[tier]]
label = "normal"
points = 2

[[tier]]
label = "hard"
points = 3

[[tier]]
label = "insane"
points = 4

[[tier]]
label = "extreme"
points = 5
"#;

/// Write a starter configuration file
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
