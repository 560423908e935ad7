//! The checksum ledger
//!
//! The ledger maps each tracked file (by path relative to the tracked root)
//! to its last known fingerprint and verification times. It is persisted as
//! versioned JSON by the [`crate::persistence`] module.

mod entry;

pub use entry::{ChecksumEntry, Lookup};

use checkbits_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Newest manifest format this build can read and the one it writes.
pub const LEDGER_VERSION: u32 = 1;

/// Mapping from relative file path to [`ChecksumEntry`].
///
/// Entries are kept sorted so the encoded manifest is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumLedger {
    /// Ledger format version for forward compatibility
    version: u32,
    /// Tracked files
    #[serde(default)]
    entries: BTreeMap<NormalizedPath, ChecksumEntry>,
}

impl Default for ChecksumLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            version: LEDGER_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Decode a ledger from its JSON encoding.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or a version newer than [`LEDGER_VERSION`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let ledger: ChecksumLedger = serde_json::from_slice(bytes)?;
        if ledger.version > LEDGER_VERSION {
            return Err(Error::UnsupportedVersion {
                found: ledger.version,
                supported: LEDGER_VERSION,
            });
        }
        Ok(ledger)
    }

    /// Encode the ledger as pretty-printed JSON at the current version.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let current = ChecksumLedgerRef {
            version: LEDGER_VERSION,
            entries: &self.entries,
        };
        let mut bytes = serde_json::to_vec_pretty(&current)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Look up a path by exact match.
    pub fn lookup(&self, path: &NormalizedPath) -> Lookup<'_> {
        self.entries.get(path).into()
    }

    pub fn get_mut(&mut self, path: &NormalizedPath) -> Option<&mut ChecksumEntry> {
        self.entries.get_mut(path)
    }

    /// Insert or replace the entry for `path`.
    pub fn insert(&mut self, path: NormalizedPath, entry: ChecksumEntry) -> Option<ChecksumEntry> {
        self.entries.insert(path, entry)
    }

    /// Entries whose path is, or lies below, one of `prefixes`.
    pub fn entries_under<'a>(
        &'a self,
        prefixes: &'a [NormalizedPath],
    ) -> impl Iterator<Item = (&'a NormalizedPath, &'a ChecksumEntry)> + 'a {
        self.entries
            .iter()
            .filter(move |(path, _)| prefixes.iter().any(|prefix| path.starts_with(prefix)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &NormalizedPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedPath, &ChecksumEntry)> {
        self.entries.iter()
    }

    /// Build the working ledger for a pass.
    ///
    /// Keeps the prior entry of every path in `current` and drops entries
    /// for paths that are no longer present. New paths get no entry until
    /// they are verified.
    pub fn carry_forward<'a>(mut self, current: impl IntoIterator<Item = &'a NormalizedPath>) -> Self {
        let mut entries = BTreeMap::new();
        for path in current {
            if let Some(entry) = self.entries.remove(path) {
                entries.insert(path.clone(), entry);
            }
        }
        let dropped = self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Pruned entries for files no longer present");
        }
        Self {
            version: LEDGER_VERSION,
            entries,
        }
    }
}

impl<'a> IntoIterator for &'a ChecksumLedger {
    type Item = (&'a NormalizedPath, &'a ChecksumEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, NormalizedPath, ChecksumEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Borrowed view used for encoding without cloning entries
#[derive(Serialize)]
struct ChecksumLedgerRef<'a> {
    version: u32,
    entries: &'a BTreeMap<NormalizedPath, ChecksumEntry>,
}
