//! Leaderboard command implementation

use anyhow::Result;

use tally::config::Config;
use tally::queries;

/// Show the total points leaderboard
pub async fn leaderboard_command(config: &Config, limit: usize) -> Result<()> {
    let ledger = super::open_ledger(config)?;
    let totals = ledger.snapshot_totals();

    if totals.is_empty() {
        println!("No data yet.");
        return Ok(());
    }

    let ranked = queries::top(&totals, limit);

    println!("Leaderboard ({} of {} users):\n", ranked.len(), totals.len());
    for (i, (user, total)) in ranked.iter().enumerate() {
        println!("  {}. {}: {} points", i + 1, user, total);
    }

    Ok(())
}
