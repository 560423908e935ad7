//! Per-file ledger entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the ledger remembers about one tracked file.
///
/// `verified_at` only moves when the stored fingerprint has been confirmed
/// against the live file, or when a classification deliberately
/// re-baselines the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumEntry {
    /// `sha256:<hex>` digest of the contents at last verification
    pub fingerprint: String,
    /// Filesystem modification time observed alongside `fingerprint`
    pub file_modified_at: DateTime<Utc>,
    /// Last time the fingerprint was confirmed (or re-baselined)
    pub verified_at: DateTime<Utc>,
}

impl ChecksumEntry {
    /// Create an entry for a freshly fingerprinted file.
    pub fn new(
        fingerprint: impl Into<String>,
        file_modified_at: DateTime<Utc>,
        verified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            file_modified_at,
            verified_at,
        }
    }

    /// Record a successful verification; fingerprint and mtime stay as they are.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.verified_at = now;
    }

    /// Replace the baseline with freshly observed values.
    pub fn rebaseline(
        &mut self,
        fingerprint: impl Into<String>,
        file_modified_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        self.fingerprint = fingerprint.into();
        self.file_modified_at = file_modified_at;
        self.verified_at = now;
    }
}

/// Result of looking a path up in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Present(&'a ChecksumEntry),
    Absent,
}

impl<'a> Lookup<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }

    pub fn entry(self) -> Option<&'a ChecksumEntry> {
        match self {
            Lookup::Present(entry) => Some(entry),
            Lookup::Absent => None,
        }
    }
}

impl<'a> From<Option<&'a ChecksumEntry>> for Lookup<'a> {
    fn from(entry: Option<&'a ChecksumEntry>) -> Self {
        entry.map_or(Lookup::Absent, Lookup::Present)
    }
}
