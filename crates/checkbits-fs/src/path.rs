//! Normalized path handling for relocatable manifests

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Manifest keys are stored in this form relative to the tracked root, so a
/// manifest written on one platform can be read on another and the whole
/// tree can be moved without invalidating it. Conversion to a native path
/// only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Empty or `.` components are dropped and a leading `/` is kept. On
    /// Windows backslashes are separators and become forward slashes; on
    /// other platforms a backslash is an ordinary file name character and is
    /// kept as is.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_str_lossy(&path.as_ref().to_string_lossy())
    }

    fn from_str_lossy(raw: &str) -> Self {
        #[cfg(windows)]
        let replaced = raw.replace('\\', "/");
        #[cfg(not(windows))]
        let replaced = raw;
        let absolute = replaced.starts_with('/');
        let cleaned = replaced
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect::<Vec<_>>()
            .join("/");
        let inner = match (absolute, cleaned.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{cleaned}"),
            (false, _) => cleaned,
        };
        Self { inner }
    }

    /// Express `path` relative to `root`.
    ///
    /// Returns `None` if `path` is not located under `root` or is `root`
    /// itself.
    pub fn relative(root: &Path, path: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let normalized = Self::new(rel);
        if normalized.inner.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Resolve this (relative) path against a native root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        self.inner.split('/').fold(root.to_path_buf(), |acc, c| acc.join(c))
    }

    /// Whether `prefix` is this path or one of its ancestor directories.
    ///
    /// Compares whole components, so `ab/c` does not start with `a`.
    pub fn starts_with(&self, prefix: &NormalizedPath) -> bool {
        match self.inner.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.inner.is_empty(),
            None => false,
        }
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::from_str_lossy(segment);
        }
        Self::from_str_lossy(&format!("{}/{}", self.inner, segment))
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|n| !n.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::from_str_lossy(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::from_str_lossy(&s)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
