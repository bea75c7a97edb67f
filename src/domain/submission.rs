use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable platform account id of a user
///
/// Opaque to the ledger: equality is exact string match, ordering is the
/// string ordering (used for deterministic leaderboard tie-breaks).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One recorded completion event
///
/// Created exactly once per successful `record_completion` call and never
/// mutated or deleted afterwards; the submission log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSubmission {
    /// Who submitted
    pub user_id: UserId,

    /// Normalized difficulty label the completions were scored against
    pub difficulty: String,

    /// How many levels of that difficulty were completed (always positive)
    pub count: u64,

    /// Points credited: `count * catalog[difficulty]` at record time
    pub earned: u64,

    /// Calendar date the completions happened on
    pub date: NaiveDate,

    /// Optional freeform note from the submitter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
