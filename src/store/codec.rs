//! Versioned record envelope
//!
//! Every persisted record is wrapped in a self-describing envelope
//! (`schema`, `record`, `data`) so the on-disk format can evolve without
//! breaking `load`. Decoding validates both the schema version and that the
//! bytes actually belong to the requested record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{RecordName, StoreError};

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    schema: u32,
    record: String,
    data: T,
}

/// Encode a record snapshot into its versioned envelope
pub fn encode<T: Serialize>(name: RecordName, data: &T) -> Result<Vec<u8>, StoreError> {
    let envelope = Envelope {
        schema: SCHEMA_VERSION,
        record: name.as_str().to_string(),
        data,
    };
    let mut bytes = serde_json::to_vec_pretty(&envelope).map_err(|e| StoreError::Encode {
        name: name.as_str(),
        source: e,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a record snapshot from its versioned envelope
pub fn decode<T: DeserializeOwned>(name: RecordName, bytes: &[u8]) -> Result<T, StoreError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt {
            name: name.as_str(),
            reason: e.to_string(),
        })?;

    if envelope.schema != SCHEMA_VERSION {
        return Err(StoreError::Corrupt {
            name: name.as_str(),
            reason: format!("unsupported schema version {}", envelope.schema),
        });
    }
    if envelope.record != name.as_str() {
        return Err(StoreError::Corrupt {
            name: name.as_str(),
            reason: format!("envelope belongs to record {}", envelope.record),
        });
    }

    Ok(envelope.data)
}
