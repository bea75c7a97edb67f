//! Filesystem record store
//!
//! One JSON file per record under the data directory. Writes follow the
//! atomic pattern: exclusive lock file, write to a temp file, `sync_all`,
//! then rename onto the stable name. Readers only ever open the stable
//! name, so they see either the old or the new snapshot, never a mix.
//!
//! The lock file protects against two writers in this process racing the
//! same record; it is not a cross-process ledger lock (single-writer-process
//! assumption, see the ledger module).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use super::{RecordName, RecordStore, StoreError};

/// Record store backed by one JSON file per record
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            name: "data directory",
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Stable path of a record file
    pub fn record_path(&self, name: RecordName) -> PathBuf {
        self.dir.join(format!("{}.json", name.as_str()))
    }
}

impl RecordStore for FileStore {
    fn load(&self, name: RecordName) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.record_path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                name: name.as_str(),
                source: e,
            }),
        }
    }

    fn save(&self, name: RecordName, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.record_path(name);
        let io_err = |source| StoreError::Io {
            name: name.as_str(),
            source,
        };

        // Lock file is separate from the record to survive the rename
        let lock_path = path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(io_err)?;
        lock_file.lock_exclusive().map_err(io_err)?;

        // Write to temp file first (atomic write pattern)
        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(io_err)?;

        temp_file.write_all(bytes).map_err(io_err)?;
        temp_file.sync_all().map_err(io_err)?;

        // Atomic rename (overwrites existing file)
        std::fs::rename(&temp_path, &path).map_err(io_err)?;

        tracing::trace!("Saved record {} ({} bytes)", name, bytes.len());
        // Lock is released when lock_file is dropped
        Ok(())
    }
}
