//! [`TestArchive`] builder for reconciliation scenarios.
//!
//! Besides plain writes it can simulate the two kinds of content change the
//! checker distinguishes: an ordinary edit (content and mtime move) and
//! silent tampering (content moves, mtime is put back).

use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A temporary directory tree with helpers for test setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use checkbits_test_utils::TestArchive;
///
/// let archive = TestArchive::new();
/// archive.write("photos/a.jpg", b"jpeg");
/// archive.tamper("photos/a.jpg", b"jpeX");
/// archive.assert_file_exists("photos/a.jpg");
/// ```
pub struct TestArchive {
    temp_dir: TempDir,
}

impl Default for TestArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl TestArchive {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the archive.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &[u8]) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestArchive::write: mkdir {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestArchive::write: {}: {e}", path.display()));
    }

    /// Write a file of exactly `len` bytes.
    pub fn write_sized(&self, rel: &str, len: usize) {
        self.write(rel, &vec![b'x'; len]);
    }

    /// Create an empty directory.
    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path(rel)).unwrap();
    }

    /// Delete a file.
    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel))
            .unwrap_or_else(|e| panic!("TestArchive::remove: {rel}: {e}"));
    }

    /// Current modification time of `rel`.
    pub fn mtime(&self, rel: &str) -> SystemTime {
        fs::metadata(self.path(rel))
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("TestArchive::mtime: {rel}: {e}"))
    }

    /// Set the modification time of `rel`.
    pub fn set_mtime(&self, rel: &str, mtime: SystemTime) {
        let file = File::options()
            .write(true)
            .open(self.path(rel))
            .unwrap_or_else(|e| panic!("TestArchive::set_mtime: {rel}: {e}"));
        file.set_times(FileTimes::new().set_modified(mtime))
            .unwrap_or_else(|e| panic!("TestArchive::set_mtime: {rel}: {e}"));
    }

    /// Replace the content of `rel` and restore its previous mtime, the way
    /// bit-rot or an out-of-band write looks to the filesystem.
    pub fn tamper(&self, rel: &str, content: &[u8]) {
        let before = self.mtime(rel);
        self.write(rel, content);
        self.set_mtime(rel, before);
    }

    /// Replace the content of `rel` as a normal edit would.
    ///
    /// The mtime is pushed two seconds past its previous value so the change
    /// is visible even on filesystems with coarse timestamps.
    pub fn edit(&self, rel: &str, content: &[u8]) {
        let before = self.mtime(rel);
        self.write(rel, content);
        self.set_mtime(rel, before + Duration::from_secs(2));
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tamper_keeps_mtime() {
        let archive = TestArchive::new();
        archive.write("f", b"one");
        let before = archive.mtime("f");

        archive.tamper("f", b"two");

        assert_eq!(archive.mtime("f"), before);
        assert_eq!(fs::read(archive.path("f")).unwrap(), b"two");
    }

    #[test]
    fn edit_moves_mtime() {
        let archive = TestArchive::new();
        archive.write("f", b"one");
        let before = archive.mtime("f");

        archive.edit("f", b"two");

        assert!(archive.mtime("f") > before);
    }
}
