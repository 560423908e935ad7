//! Shared test utilities for the checkbits workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`archive`]: [`archive::TestArchive`] builder for trees to verify

pub mod archive;

pub use archive::TestArchive;
