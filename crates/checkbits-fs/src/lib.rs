//! Filesystem layer for checkbits
//!
//! Provides normalized relative paths, crash-safe atomic writes, content
//! fingerprints and the pruning directory walk that produces the file
//! inventory of a tracked tree.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::{ArchivePath, DEFAULT_MAX_FILE_SIZE, is_hidden_name};
pub use error::{Error, Result};
pub use inventory::{FileInventory, Inventory, InventoryEntry, UnreadablePath};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
