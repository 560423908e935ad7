//! Progress callbacks for a running pass

use chrono::{DateTime, Utc};
use checkbits_fs::NormalizedPath;

use super::report::{Classification, PassOutcome, SkippedFile};

/// Receives per-file events as a pass runs.
///
/// All methods default to doing nothing, so implementors only override what
/// they display.
pub trait PassObserver {
    /// A file was left out of the manifest.
    fn on_skip(&mut self, _skipped: &SkippedFile) {}

    /// A file was fingerprinted and classified. `last_verified_at` is the
    /// previous verification time for anomalies, `None` otherwise.
    fn on_classified(
        &mut self,
        _path: &NormalizedPath,
        _classification: Classification,
        _last_verified_at: Option<DateTime<Utc>>,
    ) {
    }

    /// A file, or a directory below the root, could not be read this pass.
    fn on_failure(&mut self, _path: &NormalizedPath, _reason: &str) {}

    /// The verification loop ended.
    fn on_finished(&mut self, _outcome: &PassOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl PassObserver for SilentObserver {}
