//! Submit command implementation

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use tally::config::Config;
use tally::UserId;

/// Record level completions for a user.
///
/// Entries arrive as `difficulty=count` pairs; all of them are validated
/// against the catalog before anything is recorded, so a typo in the last
/// pair does not leave the first pair half-applied.
pub async fn submit_command(
    config: &Config,
    user: String,
    entries: Vec<String>,
    date: Option<NaiveDate>,
    note: Option<String>,
) -> Result<()> {
    let ledger = super::open_ledger(config)?;
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let user_id = UserId::new(user);

    let mut parsed: Vec<(String, i64)> = Vec::new();
    for raw in &entries {
        let (label, count) = parse_entry(raw)?;
        if ledger.catalog().lookup(&label).is_none() {
            let known: Vec<&str> = ledger.catalog().tiers().map(|(l, _)| l).collect();
            bail!(
                "Unknown difficulty \"{}\" (known: {})",
                label.trim(),
                known.join(", ")
            );
        }
        if count <= 0 {
            bail!("Count for \"{}\" must be positive, got {}", label.trim(), count);
        }
        parsed.push((label, count));
    }

    let mut earned = 0u64;
    let mut new_total = 0u64;
    for (label, count) in parsed {
        let receipt = ledger.record_completion(&user_id, &label, count, date, note.clone())?;
        earned += receipt.points_earned;
        new_total = receipt.new_total;
    }

    println!(
        "Recorded {} point(s) for {} on {} (total: {})",
        earned, user_id, date, new_total
    );

    Ok(())
}

/// Parse one `difficulty=count` entry
fn parse_entry(raw: &str) -> Result<(String, i64)> {
    let Some((label, count)) = raw.split_once('=') else {
        bail!("Invalid entry \"{}\": expected difficulty=count", raw);
    };
    let count: i64 = count
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid count in \"{}\": expected an integer", raw))?;
    Ok((label.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("hard=2").unwrap(), ("hard".to_string(), 2));
        assert_eq!(parse_entry("easy = 1").unwrap(), ("easy ".to_string(), 1));
    }

    #[test]
    fn test_parse_entry_rejects_malformed() {
        assert!(parse_entry("hard").is_err());
        assert!(parse_entry("hard=two").is_err());
    }
}
