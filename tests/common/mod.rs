//! Shared test utilities for ledger integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use tally::store::{RecordName, RecordStore, StoreError};

/// In-memory record store for tests that do not need a real filesystem
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<&'static str, Vec<u8>>>,
}

impl RecordStore for MemoryStore {
    fn load(&self, name: RecordName) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.lock().unwrap().get(name.as_str()).cloned())
    }

    fn save(&self, name: RecordName, bytes: &[u8]) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(name.as_str(), bytes.to_vec());
        Ok(())
    }
}

/// Store whose saves of one chosen record fail while armed.
///
/// Loads always succeed, so the ledger can be opened normally before the
/// failure is switched on.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: RecordName,
    armed: Arc<AtomicBool>,
}

impl FailingStore {
    pub fn new(fail_on: RecordName) -> (Self, Arc<AtomicBool>) {
        let armed = Arc::new(AtomicBool::new(false));
        let store = Self {
            inner: MemoryStore::default(),
            fail_on,
            armed: armed.clone(),
        };
        (store, armed)
    }
}

impl RecordStore for FailingStore {
    fn load(&self, name: RecordName) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.load(name)
    }

    fn save(&self, name: RecordName, bytes: &[u8]) -> Result<(), StoreError> {
        if name == self.fail_on && self.armed.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                name: name.as_str(),
                source: std::io::Error::other("injected save failure"),
            });
        }
        self.inner.save(name, bytes)
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}
