//! Inventory of the files currently present in a tracked tree
//!
//! The walk prunes hidden entries (and everything below them) before they
//! are ever visited, and reports oversized files instead of yielding them.
//! Directories that cannot be read below the root are listed separately so
//! callers can tell "gone" apart from "not looked at".

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::constants::{DEFAULT_MAX_FILE_SIZE, is_hidden_name};
use crate::{Error, NormalizedPath, Result};

/// One item produced by [`FileInventory::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEntry {
    /// A regular file that should be tracked, relative to the root
    Eligible(NormalizedPath),
    /// A regular file larger than the configured ceiling
    Oversized { path: NormalizedPath, size: u64 },
    /// A regular file whose name is not valid UTF-8 and so cannot be a
    /// manifest key. `path` is the lossy form, for display only.
    UnencodableName(NormalizedPath),
}

impl InventoryEntry {
    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Eligible(path) | Self::Oversized { path, .. } | Self::UnencodableName(path) => {
                path
            }
        }
    }
}

/// A file or directory below the root that the walk could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadablePath {
    /// Relative to the root. For a directory, everything under it went unseen.
    pub path: NormalizedPath,
    pub message: String,
}

/// The result of [`FileInventory::collect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Sorted by path
    pub entries: Vec<InventoryEntry>,
    pub unreadable: Vec<UnreadablePath>,
}

/// Walks a directory tree once to list the files that should be tracked.
#[derive(Debug, Clone)]
pub struct FileInventory {
    root: PathBuf,
    max_file_size: u64,
}

impl FileInventory {
    /// Create an inventory for `root` with the default size ceiling.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Override the size ceiling. Files of exactly `max_file_size` bytes are
    /// still eligible.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Lazily walk the tree.
    ///
    /// Failing to read the root itself yields [`Error::RootUnreadable`];
    /// problems further down yield [`Error::Walk`] items that callers may
    /// log and skip. Traversal order is unspecified.
    pub fn walk(&self) -> impl Iterator<Item = Result<InventoryEntry>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(move |entry| self.classify(entry))
    }

    /// Walk the whole tree, failing only if the root cannot be enumerated.
    ///
    /// Entries come back sorted by path. Errors below the root are logged
    /// and returned in [`Inventory::unreadable`].
    pub fn collect(&self) -> Result<Inventory> {
        let mut inventory = Inventory::default();
        for item in self.walk() {
            match item {
                Ok(entry) => inventory.entries.push(entry),
                Err(Error::Walk { path, message }) => {
                    tracing::warn!(path = %path.display(), "Skipping unreadable entry: {}", message);
                    if let Some(path) = NormalizedPath::relative(&self.root, &path) {
                        inventory.unreadable.push(UnreadablePath { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }
        inventory.entries.sort_by(|a, b| a.path().cmp(b.path()));
        inventory.unreadable.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(inventory)
    }

    fn classify(&self, entry: walkdir::Result<DirEntry>) -> Option<Result<InventoryEntry>> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Some(Err(self.walk_error(e))),
        };

        if !entry.file_type().is_file() {
            return None;
        }

        let path = NormalizedPath::relative(&self.root, entry.path())?;
        let representable = entry
            .path()
            .strip_prefix(&self.root)
            .is_ok_and(|rel| rel.to_str().is_some());
        if !representable {
            tracing::debug!(path = %path, "File name is not valid UTF-8");
            return Some(Ok(InventoryEntry::UnencodableName(path)));
        }
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => return Some(Err(self.walk_error(e))),
        };

        if size > self.max_file_size {
            tracing::debug!(path = %path, size, "File exceeds size ceiling");
            Some(Ok(InventoryEntry::Oversized { path, size }))
        } else {
            Some(Ok(InventoryEntry::Eligible(path)))
        }
    }

    fn walk_error(&self, err: walkdir::Error) -> Error {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        if err.depth() == 0 {
            Error::RootUnreadable {
                path,
                message: err.to_string(),
            }
        } else {
            Error::Walk {
                path,
                message: err.to_string(),
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    is_hidden_name(&entry.file_name().to_string_lossy())
}
