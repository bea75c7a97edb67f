//! The points ledger - authoritative state and its sole mutator
//!
//! The ledger owns the three structures (cumulative totals, daily deltas,
//! submission log) in memory and mirrors them to the record store. The
//! published state is replaced only after all three records are durably
//! saved, so a failed save leaves memory and disk identical to the last
//! successful update and the whole submission can be retried.
//!
//! Concurrency: a mutator mutex serializes `record_completion` end to end;
//! snapshots take a brief read lock on the published state and never touch
//! persistence I/O.

use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{CompletionSubmission, DifficultyCatalog, UserId};
use crate::store::{self, RecordName, RecordStore, StoreError};

/// Cumulative point totals per user
pub type Totals = BTreeMap<UserId, u64>;

/// Points earned per user on each calendar date
pub type DailyDeltas = BTreeMap<NaiveDate, BTreeMap<UserId, u64>>;

/// Error type for ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The difficulty label does not resolve in the catalog
    #[error("unknown difficulty: {0}")]
    InvalidDifficulty(String),

    /// The completion count is not a positive integer
    #[error("completion count must be positive, got {0}")]
    InvalidAmount(i64),

    /// Stored data is unreadable. Fatal at startup: resetting to an empty
    /// ledger would silently erase history, so this demands operator
    /// intervention instead.
    #[error("corrupt ledger record: {0}")]
    Corrupt(StoreError),

    /// A save failed mid-update. The published state still matches the last
    /// durable snapshot; retrying the whole submission is safe.
    #[error("failed to persist ledger update: {0}")]
    Persistence(StoreError),
}

/// Result of a successful completion submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// The user's cumulative total after this submission
    pub new_total: u64,
    /// Points credited by this submission
    pub points_earned: u64,
}

/// The three ledger structures, updated together or not at all
#[derive(Debug, Clone, Default)]
struct LedgerState {
    totals: Totals,
    daily: DailyDeltas,
    log: Vec<CompletionSubmission>,
}

impl LedgerState {
    fn daily_sum(&self, user: &UserId) -> u64 {
        self.daily.values().filter_map(|day| day.get(user)).sum()
    }
}

/// Authoritative points ledger
///
/// Constructed once at startup via [`PointsLedger::open`], lives for the
/// process lifetime. `record_completion` is the only mutating operation in
/// the system; everything else is a read over a consistent snapshot.
pub struct PointsLedger {
    catalog: DifficultyCatalog,
    store: Box<dyn RecordStore>,

    /// Published point-in-time state, swapped only after a successful persist
    state: RwLock<LedgerState>,

    /// Serializes the whole read-compute-persist-publish mutator sequence
    write: Mutex<()>,
}

impl PointsLedger {
    /// Load the ledger from its persisted records (empty maps on first run).
    ///
    /// A record that exists but cannot be decoded fails the open with
    /// [`LedgerError::Corrupt`] - history is never silently reset.
    pub fn open(
        catalog: DifficultyCatalog,
        store: Box<dyn RecordStore>,
    ) -> Result<Self, LedgerError> {
        let totals: Totals =
            Self::load_record(&*store, RecordName::Totals)?.unwrap_or_default();
        let daily: DailyDeltas =
            Self::load_record(&*store, RecordName::DailyDeltas)?.unwrap_or_default();
        let log: Vec<CompletionSubmission> =
            Self::load_record(&*store, RecordName::SubmissionLog)?.unwrap_or_default();

        let state = LedgerState { totals, daily, log };

        for (user, total) in &state.totals {
            let from_daily = state.daily_sum(user);
            if from_daily != *total {
                tracing::warn!(
                    "Total for {} ({}) disagrees with daily deltas ({}); \
                     records may stem from an interrupted write",
                    user,
                    total,
                    from_daily
                );
            }
        }

        tracing::debug!(
            "Loaded ledger: {} user(s), {} active day(s), {} submission(s)",
            state.totals.len(),
            state.daily.len(),
            state.log.len()
        );

        Ok(Self {
            catalog,
            store,
            state: RwLock::new(state),
            write: Mutex::new(()),
        })
    }

    /// The catalog this ledger scores against
    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    /// Record a completion submission - the single mutating operation.
    ///
    /// On success the submission log, daily deltas, and totals have all been
    /// updated and durably persisted (in that order) before this returns.
    /// On failure nothing was applied.
    pub fn record_completion(
        &self,
        user_id: &UserId,
        difficulty: &str,
        count: i64,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<Receipt, LedgerError> {
        let (label, points) = self
            .catalog
            .resolve(difficulty)
            .ok_or_else(|| LedgerError::InvalidDifficulty(difficulty.trim().to_string()))?;
        if count <= 0 {
            return Err(LedgerError::InvalidAmount(count));
        }
        let earned = points
            .checked_mul(count as u64)
            .ok_or(LedgerError::InvalidAmount(count))?;

        // No two submissions may interleave their read-modify-write on the
        // shared maps, or one increment is lost.
        let _mutator = self.write.lock().expect("ledger mutator lock poisoned");

        // Stage the update on a copy; the published state stays untouched
        // until all three records are durably saved.
        let mut next = self
            .state
            .read()
            .expect("ledger state lock poisoned")
            .clone();

        next.log.push(CompletionSubmission {
            user_id: user_id.clone(),
            difficulty: label,
            count: count as u64,
            earned,
            date,
            note,
        });
        *next
            .daily
            .entry(date)
            .or_default()
            .entry(user_id.clone())
            .or_insert(0) += earned;
        let total = next.totals.entry(user_id.clone()).or_insert(0);
        *total += earned;
        let new_total = *total;

        self.persist(&next)?;

        *self.state.write().expect("ledger state lock poisoned") = next;

        tracing::debug!(
            "Recorded {} point(s) for {} on {} (total {})",
            earned,
            user_id,
            date,
            new_total
        );
        Ok(Receipt {
            new_total,
            points_earned: earned,
        })
    }

    /// Consistent copy of the cumulative totals
    pub fn snapshot_totals(&self) -> Totals {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .totals
            .clone()
    }

    /// Consistent date-ascending copy of the daily deltas
    pub fn snapshot_daily(&self) -> Vec<(NaiveDate, BTreeMap<UserId, u64>)> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .daily
            .iter()
            .map(|(date, deltas)| (*date, deltas.clone()))
            .collect()
    }

    /// Consistent copy of the append-only submission log
    pub fn snapshot_log(&self) -> Vec<CompletionSubmission> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .log
            .clone()
    }

    /// Persist all three records, submission log first and totals last
    fn persist(&self, state: &LedgerState) -> Result<(), LedgerError> {
        self.save_record(RecordName::SubmissionLog, &state.log)?;
        self.save_record(RecordName::DailyDeltas, &state.daily)?;
        self.save_record(RecordName::Totals, &state.totals)?;
        Ok(())
    }

    fn save_record<T: Serialize>(&self, name: RecordName, data: &T) -> Result<(), LedgerError> {
        let bytes = store::encode(name, data).map_err(LedgerError::Persistence)?;
        self.store
            .save(name, &bytes)
            .map_err(LedgerError::Persistence)
    }

    fn load_record<T: DeserializeOwned>(
        store: &dyn RecordStore,
        name: RecordName,
    ) -> Result<Option<T>, LedgerError> {
        match store.load(name) {
            Ok(Some(bytes)) => Ok(Some(
                store::decode(name, &bytes).map_err(LedgerError::Corrupt)?,
            )),
            Ok(None) => Ok(None),
            Err(e @ StoreError::Corrupt { .. }) => Err(LedgerError::Corrupt(e)),
            Err(e) => Err(LedgerError::Persistence(e)),
        }
    }
}
