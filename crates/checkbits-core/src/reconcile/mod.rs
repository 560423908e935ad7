//! Reconciliation of a live tree against its ledger
//!
//! A pass carries prior entries forward for files that still exist, visits
//! every file from a random starting point, and classifies each one as new,
//! verified, corrupted or changed.

mod engine;
mod observer;
mod order;
mod probe;
mod report;

pub use engine::{Reconciliation, ReconciliationEngine, classify};
pub use observer::{PassObserver, SilentObserver};
pub use order::{FixedStart, RandomStart, SeededStart, StartSelector, rotated};
pub use probe::{FileProbe, LiveProbe, Observation};
pub use report::{
    Anomaly, AnomalyReport, Classification, FileFailure, PassOutcome, ReconcileReport,
    SkipReason, SkippedFile, StopReason,
};
