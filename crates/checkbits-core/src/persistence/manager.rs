//! PersistenceManager implementation

use std::io::ErrorKind;
use std::path::Path;

use checkbits_fs::{ArchivePath, NormalizedPath, RobustnessConfig, io};
use serde::Serialize;

use crate::ledger::ChecksumLedger;
use crate::{Error, Result};

/// Where a loaded ledger came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerSource {
    /// The primary manifest decoded cleanly
    Primary,
    /// The primary was missing or corrupt; the backup was used
    Backup,
    /// Neither file was usable; every file will be treated as new
    Empty,
}

/// Ledger returned by [`PersistenceManager::load`]
#[derive(Debug, Clone)]
pub struct LoadedLedger {
    pub ledger: ChecksumLedger,
    pub source: LedgerSource,
}

/// Loads and saves the ledger of one tracked root.
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    primary: NormalizedPath,
    backup: NormalizedPath,
    robustness: RobustnessConfig,
}

impl PersistenceManager {
    /// Create a manager for the manifest files at the top of `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            primary: NormalizedPath::new(root.join(ArchivePath::Manifest.as_str())),
            backup: NormalizedPath::new(root.join(ArchivePath::Backup.as_str())),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }

    pub fn primary_path(&self) -> &NormalizedPath {
        &self.primary
    }

    pub fn backup_path(&self) -> &NormalizedPath {
        &self.backup
    }

    /// Load the prior ledger. Never fails.
    ///
    /// On a clean primary, its exact bytes are copied to the backup location
    /// before returning so a crash during the coming pass can be recovered
    /// from. Otherwise the backup is tried, and failing that an empty ledger
    /// is returned.
    pub fn load(&self) -> LoadedLedger {
        match read_ledger(&self.primary) {
            Ok(Some((ledger, bytes))) => {
                if let Err(e) = io::write_atomic(&self.backup, &bytes, self.robustness) {
                    tracing::warn!(path = %self.backup, "Could not write manifest backup: {}", e);
                }
                tracing::info!(path = %self.primary, entries = ledger.len(), "Loaded manifest");
                return LoadedLedger {
                    ledger,
                    source: LedgerSource::Primary,
                };
            }
            Ok(None) => tracing::debug!(path = %self.primary, "No manifest yet"),
            Err(e) => tracing::warn!("{}", e),
        }

        match read_ledger(&self.backup) {
            Ok(Some((ledger, _))) => {
                tracing::warn!(path = %self.backup, entries = ledger.len(), "Recovered manifest from backup");
                LoadedLedger {
                    ledger,
                    source: LedgerSource::Backup,
                }
            }
            Ok(None) => LoadedLedger {
                ledger: ChecksumLedger::new(),
                source: LedgerSource::Empty,
            },
            Err(e) => {
                tracing::warn!("{}", e);
                tracing::warn!("Starting from an empty manifest");
                LoadedLedger {
                    ledger: ChecksumLedger::new(),
                    source: LedgerSource::Empty,
                }
            }
        }
    }

    /// Atomically replace the primary manifest with `ledger`, then drop the
    /// backup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the manifest could not be written.
    /// In that case the previous manifest and the backup are left as they
    /// were.
    pub fn save(&self, ledger: &ChecksumLedger) -> Result<()> {
        let bytes = ledger.to_json()?;
        io::write_atomic(&self.primary, &bytes, self.robustness).map_err(|source| {
            Error::Persistence {
                path: self.primary.to_native(),
                source,
            }
        })?;
        tracing::info!(path = %self.primary, entries = ledger.len(), "Saved manifest");

        if let Err(e) = io::remove_if_exists(&self.backup) {
            // Harmless: the next load overwrites the backup from the new primary
            tracing::warn!(path = %self.backup, "Could not remove manifest backup: {}", e);
        }
        Ok(())
    }
}

/// Read and decode a manifest. `Ok(None)` if the file does not exist.
fn read_ledger(path: &NormalizedPath) -> Result<Option<(ChecksumLedger, Vec<u8>)>> {
    let bytes = match io::read_bytes(path) {
        Ok(bytes) => bytes,
        Err(checkbits_fs::Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(e) => {
            return Err(Error::ManifestUnreadable {
                path: path.to_native(),
                reason: e.to_string(),
            });
        }
    };

    let ledger = ChecksumLedger::from_json(&bytes).map_err(|e| Error::ManifestUnreadable {
        path: path.to_native(),
        reason: e.to_string(),
    })?;
    Ok(Some((ledger, bytes)))
}
