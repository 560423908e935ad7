//! SHA-256 fingerprints
//!
//! Provides a single canonical fingerprint format (`sha256:<hex>`) used for
//! every manifest entry.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// What a single read of a live file observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Canonical `sha256:<hex>` fingerprint of the contents
    pub fingerprint: String,
    /// Modification time reported by the filesystem when the file was opened
    pub modified: SystemTime,
    /// Number of bytes hashed
    pub len: u64,
}

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

fn hash_reader(mut reader: impl Read) -> io::Result<(String, u64)> {
    let mut hasher = Sha256::new();
    let len = io::copy(&mut reader, &mut hasher)?;
    Ok((format!("{}{:x}", PREFIX, hasher.finalize()), len))
}

/// Fingerprint a file and capture its modification time in one pass.
///
/// The modification time is taken from the open handle before reading.
/// Files that are (or grow to be) larger than `max_len` bytes are refused
/// with an [`std::io::ErrorKind::FileTooLarge`] error instead of being
/// hashed in full.
pub fn snapshot_file(path: &Path, max_len: u64) -> Result<FileSnapshot> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let metadata = file.metadata().map_err(|e| Error::io(path, e))?;
    if metadata.len() > max_len {
        return Err(too_large(path, metadata.len(), max_len));
    }
    let modified = metadata.modified().map_err(|e| Error::io(path, e))?;

    let limited = BufReader::new(file).take(max_len.saturating_add(1));
    let (fingerprint, len) = hash_reader(limited).map_err(|e| Error::io(path, e))?;
    if len > max_len {
        return Err(too_large(path, len, max_len));
    }

    Ok(FileSnapshot {
        fingerprint,
        modified,
        len,
    })
}

fn too_large(path: &Path, len: u64, max_len: u64) -> Error {
    Error::io(
        path,
        io::Error::new(
            io::ErrorKind::FileTooLarge,
            format!("{len} bytes exceeds the {max_len} byte ceiling"),
        ),
    )
}
