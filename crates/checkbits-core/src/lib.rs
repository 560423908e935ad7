//! Core of checkbits
//!
//! This crate keeps a per-tree integrity manifest up to date:
//!
//! - **Ledger**: path → fingerprint, modification time and last verification
//! - **Reconciliation**: re-fingerprint every file and classify it as new,
//!   verified, corrupted or changed
//! - **Persistence**: backup-then-atomic-replace storage of the manifest
//! - **Checker**: one run from load to save
//!
//! # Architecture
//!
//! ```text
//!                   checkbits-cli
//!                         |
//!                  checkbits-core
//!     +---------+--------+---------+-----------+
//!     |         |        |         |           |
//!  ledger  reconcile  persistence  config   context
//!                         |
//!                   checkbits-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use checkbits_core::{Checker, ReconciliationContext, Settings, SilentObserver};
//!
//! fn verify(root: &std::path::Path) -> checkbits_core::Result<()> {
//!     let context = ReconciliationContext::new(root, Settings::load(root)?)?;
//!     let summary = Checker::new(context).run(&mut SilentObserver)?;
//!     println!("{} corrupted", summary.report.anomalies.corrupted.len());
//!     Ok(())
//! }
//! ```

pub mod cancel;
pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod pass;
pub mod persistence;
pub mod reconcile;

pub use cancel::CancellationToken;
pub use config::{CorruptionPolicy, Settings};
pub use context::ReconciliationContext;
pub use error::{Error, Result};
pub use ledger::{ChecksumEntry, ChecksumLedger, LEDGER_VERSION, Lookup};
pub use pass::{Checker, PassSummary};
pub use persistence::{LedgerSource, LoadedLedger, PersistenceManager};
pub use reconcile::{
    Anomaly, AnomalyReport, Classification, FileFailure, FileProbe, LiveProbe, Observation,
    PassObserver, PassOutcome, ReconcileReport, Reconciliation, ReconciliationEngine,
    SilentObserver, SkipReason, SkippedFile, StartSelector, StopReason,
};
