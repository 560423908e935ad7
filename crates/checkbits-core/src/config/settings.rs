//! Settings file model

use std::path::Path;

use checkbits_fs::{ArchivePath, ConfigStore, DEFAULT_MAX_FILE_SIZE, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;

/// What to do with a ledger entry whose file content changed while its
/// modification time did not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptionPolicy {
    /// Keep the last known-good fingerprint so the anomaly is reported again
    /// on every run until someone intervenes.
    #[default]
    Freeze,
    /// Take the new content as the baseline.
    Accept,
}

impl std::fmt::Display for CorruptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Freeze => write!(f, "freeze"),
            Self::Accept => write!(f, "accept"),
        }
    }
}

/// Tunables for one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Files larger than this are skipped
    pub max_file_size: u64,
    /// Handling of content changes without an mtime change
    pub corruption_policy: CorruptionPolicy,
    /// Stop after verifying this many files (the rest wait for a later run)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            corruption_policy: CorruptionPolicy::default(),
            max_files: None,
        }
    }
}

impl Settings {
    /// Load `.checkbits.toml` from `root`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = NormalizedPath::new(root.join(ArchivePath::Settings.as_str()));
        let settings = ConfigStore::new().load_optional(&path)?;
        match settings {
            Some(settings) => {
                tracing::debug!(path = %path, "Loaded settings");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_file_size, 30_000_000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".checkbits.toml"),
            "corruption_policy = \"accept\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(
            settings,
            Settings {
                corruption_policy: CorruptionPolicy::Accept,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn all_fields_are_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".checkbits.toml"),
            "max_file_size = 1024\ncorruption_policy = \"freeze\"\nmax_files = 7\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.max_file_size, 1024);
        assert_eq!(settings.max_files, Some(7));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".checkbits.toml"),
            "corruption_policy = \"repair\"\n",
        )
        .unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }
}
