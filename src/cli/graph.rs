//! Graph command implementation
//!
//! Chart rendering lives outside this binary; the command prints CSV that
//! plotting front-ends consume directly.

use anyhow::Result;

use tally::config::Config;
use tally::queries;

/// Print daily points data for charting.
///
/// Default output is the community daily totals (one row per day with
/// activity). With `--per-user`, prints the gap-free per-user cumulative
/// series instead, one column per user.
pub async fn graph_command(config: &Config, per_user: bool) -> Result<()> {
    let ledger = super::open_ledger(config)?;
    let daily = ledger.snapshot_daily();

    if daily.is_empty() {
        println!("No data yet.");
        return Ok(());
    }

    if per_user {
        let series = queries::cumulative_series(&daily);
        // The last point carries every user ever seen
        let users: Vec<String> = series
            .last()
            .map(|p| p.totals.keys().map(|u| u.to_string()).collect())
            .unwrap_or_default();

        println!("date,{}", users.join(","));
        for point in &series {
            let row: Vec<String> = point.totals.values().map(|v| v.to_string()).collect();
            println!("{},{}", point.date, row.join(","));
        }
    } else {
        println!("date,points");
        for (date, points) in queries::daily_totals(&daily) {
            println!("{},{}", date, points);
        }
    }

    Ok(())
}
