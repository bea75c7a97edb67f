//! Atomicity under persistence failure
//!
//! A failed save mid-submission must leave the observable ledger state
//! exactly as it was before the call, whichever of the three record writes
//! fails, and a retry of the whole submission must then succeed cleanly.

mod common;

use std::sync::atomic::Ordering;

use tally::domain::{DifficultyCatalog, UserId};
use tally::ledger::{LedgerError, PointsLedger};
use tally::store::RecordName;

use common::{date, FailingStore};

fn failing_ledger(fail_on: RecordName) -> (PointsLedger, std::sync::Arc<std::sync::atomic::AtomicBool>) {
    let (store, armed) = FailingStore::new(fail_on);
    let ledger = PointsLedger::open(DifficultyCatalog::default(), Box::new(store))
        .expect("open ledger on empty store");
    (ledger, armed)
}

fn assert_rolls_back(fail_on: RecordName) {
    let (ledger, armed) = failing_ledger(fail_on);
    let user = UserId::from("u1");
    let day = date("2024-05-01");

    // Seed some state while saves still succeed
    ledger.record_completion(&user, "hard", 1, day, None).unwrap();

    let before_totals = ledger.snapshot_totals();
    let before_daily = ledger.snapshot_daily();
    let before_log = ledger.snapshot_log();

    armed.store(true, Ordering::SeqCst);
    let result = ledger.record_completion(&user, "easy", 1, day, None);
    assert!(
        matches!(result, Err(LedgerError::Persistence(_))),
        "failing record {}",
        fail_on
    );

    // Nothing was applied
    assert_eq!(ledger.snapshot_totals(), before_totals);
    assert_eq!(ledger.snapshot_daily(), before_daily);
    assert_eq!(ledger.snapshot_log(), before_log);

    // Retrying the whole submission is safe once saves work again
    armed.store(false, Ordering::SeqCst);
    let receipt = ledger.record_completion(&user, "easy", 1, day, None).unwrap();
    assert_eq!(receipt.new_total, 4);
    assert_eq!(ledger.snapshot_log().len(), 2);
}

#[test]
fn test_rolls_back_when_totals_save_fails() {
    assert_rolls_back(RecordName::Totals);
}

#[test]
fn test_rolls_back_when_daily_save_fails() {
    assert_rolls_back(RecordName::DailyDeltas);
}

#[test]
fn test_rolls_back_when_log_save_fails() {
    assert_rolls_back(RecordName::SubmissionLog);
}
