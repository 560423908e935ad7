//! Constants and enums for the files checkbits keeps next to a tracked tree.

use std::path::Path;

/// Files larger than this many bytes are skipped by default.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 30_000_000;

/// Name prefix marking an entry as hidden. Hidden entries are pruned from
/// the walk together with their whole subtree.
pub const HIDDEN_PREFIX: char = '.';

/// Well-known files stored at the root of a tracked tree.
///
/// All of them are hidden, so the inventory never picks them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivePath {
    /// The primary manifest (`.checkbits.json`)
    Manifest,
    /// Recovery copy of the manifest taken before a pass (`.checkbits.json.backup`)
    Backup,
    /// Optional per-tree settings (`.checkbits.toml`)
    Settings,
    /// Advisory lock taken while the manifest is replaced
    /// (`.checkbits.json.lock`). It stays on disk between runs; only the
    /// lock held on it matters.
    Lock,
}

impl ArchivePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => ".checkbits.json",
            Self::Backup => ".checkbits.json.backup",
            Self::Settings => ".checkbits.toml",
            Self::Lock => ".checkbits.json.lock",
        }
    }
}

impl AsRef<Path> for ArchivePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a single path component names a hidden entry.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}
