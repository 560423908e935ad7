//! Everything one pass needs to know, passed explicitly between components

use std::path::{Path, PathBuf};

use crate::cancel::CancellationToken;
use crate::config::Settings;
use crate::{Error, Result};

/// State shared by the inventory, the engine and persistence for one run.
#[derive(Debug, Clone)]
pub struct ReconciliationContext {
    root: PathBuf,
    settings: Settings,
    cancellation: CancellationToken,
}

impl ReconciliationContext {
    /// Create a context for `root`.
    ///
    /// The root is canonicalized so relative paths in the manifest do not
    /// depend on the working directory the tool was started from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] or [`Error::RootNotDirectory`].
    pub fn new(root: impl AsRef<Path>, settings: Settings) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(Error::RootNotDirectory {
                path: root.to_path_buf(),
            });
        }
        let root = dunce::canonicalize(root)?;

        Ok(Self {
            root,
            settings,
            cancellation: CancellationToken::new(),
        })
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}
