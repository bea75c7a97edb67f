//! Durable storage for the ledger's named records
//!
//! The ledger persists three records: cumulative totals, daily deltas, and
//! the submission log. Each record is a full-replacement snapshot keyed by a
//! logical name; the store knows nothing about the data inside the bytes.
//!
//! The filesystem implementation writes each record with an atomic
//! temp-file-and-rename so readers never observe a partially written
//! snapshot and a crash mid-write leaves either the old or the new file
//! intact. A corrupt record is surfaced as an error, never silently
//! replaced with an empty default - that would erase history.

mod codec;
mod file;

pub use codec::{decode, encode, SCHEMA_VERSION};
pub use file::FileStore;

/// Logical names of the three durable records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordName {
    Totals,
    DailyDeltas,
    SubmissionLog,
}

impl RecordName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordName::Totals => "totals",
            RecordName::DailyDeltas => "daily_deltas",
            RecordName::SubmissionLog => "submission_log",
        }
    }
}

impl std::fmt::Display for RecordName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for record storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access record {name}: {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode record {name}: {source}")]
    Encode {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {name} is corrupt: {reason}")]
    Corrupt { name: &'static str, reason: String },
}

/// Durable key/value persistence for named record snapshots
///
/// `load` returns the last successfully written snapshot, or `None` when the
/// record has never been written (first run). `save` durably persists a full
/// replacement and must be atomic with respect to concurrent readers and
/// crash-safe.
pub trait RecordStore: Send + Sync {
    fn load(&self, name: RecordName) -> Result<Option<Vec<u8>>, StoreError>;

    fn save(&self, name: RecordName, bytes: &[u8]) -> Result<(), StoreError>;
}
