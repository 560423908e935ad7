//! Reading the live state of a tracked file

use std::path::Path;

use chrono::{DateTime, Utc};
use checkbits_fs::{NormalizedPath, checksum};

use crate::Result;

/// Fresh fingerprint and modification time of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub fingerprint: String,
    pub modified_at: DateTime<Utc>,
}

/// Source of [`Observation`]s for the engine.
pub trait FileProbe {
    /// Observe `path` (relative to `root`).
    ///
    /// An error means the file could not be read this pass; the engine keeps
    /// the previous ledger entry.
    fn observe(&self, root: &Path, path: &NormalizedPath) -> Result<Observation>;
}

/// Reads and hashes files on disk.
#[derive(Debug, Clone, Copy)]
pub struct LiveProbe {
    max_file_size: u64,
}

impl LiveProbe {
    /// Files that have grown beyond `max_file_size` since the inventory was
    /// taken are refused rather than hashed.
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl FileProbe for LiveProbe {
    fn observe(&self, root: &Path, path: &NormalizedPath) -> Result<Observation> {
        let snapshot = checksum::snapshot_file(&path.under(root), self.max_file_size)?;
        Ok(Observation {
            fingerprint: snapshot.fingerprint,
            modified_at: DateTime::<Utc>::from(snapshot.modified),
        })
    }
}
