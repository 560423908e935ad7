//! Error types for checkbits-core

use std::path::PathBuf;

/// Result type for checkbits-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in checkbits-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tracked root does not exist
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The tracked root exists but is not a directory
    #[error("Root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// A manifest file exists but could not be decoded
    #[error("Manifest unreadable at {path}: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// A manifest was written by a newer format version
    #[error("Unsupported manifest version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The updated manifest could not be written
    #[error("Failed to persist manifest at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: checkbits_fs::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from checkbits-fs
    #[error(transparent)]
    Fs(#[from] checkbits_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
