//! Tally - community achievement points ledger
//!
//! Tally records discrete "completion" events (a user finishing one or more
//! levels of a given difficulty), maintains cumulative point totals per user,
//! and derives two read views from that history: a ranked leaderboard and a
//! daily time-series suitable for charting.
//!
//! ## Architecture
//!
//! The authoritative state lives in memory inside [`ledger::PointsLedger`]
//! behind a single mutator boundary; the on-disk records are a durability
//! mirror, not the source of truth for each call. Three named JSON records
//! (`totals`, `daily_deltas`, `submission_log`) are written with an atomic
//! temp-file-and-rename pattern so a crash mid-write leaves either the old
//! or the new snapshot intact, never a truncated mix.
//!
//! The CLI in `src/main.rs` and `src/cli/` is a thin adapter: it parses
//! arguments, calls the ledger, and prints results. All rules live here.

pub mod config;
pub mod domain;
pub mod ledger;
pub mod queries;
pub mod store;

pub use domain::*;
