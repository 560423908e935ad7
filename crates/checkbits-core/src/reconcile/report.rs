//! Report types produced by a reconciliation pass

use chrono::{DateTime, Utc};
use checkbits_fs::NormalizedPath;
use serde::Serialize;

/// How a verified file compares to its ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Not in the ledger yet
    New,
    /// Fingerprint matches the ledger
    Verified,
    /// Content changed but the modification time did not
    Corrupted,
    /// Content and modification time both changed
    Changed,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Verified => "verified",
            Self::Corrupted => "corrupted",
            Self::Changed => "changed",
        }
    }

    /// Whether the fingerprint disagreed with the ledger
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Self::Corrupted | Self::Changed)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file whose fingerprint did not match the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub path: NormalizedPath,
    pub classification: Classification,
    /// Last time the stored fingerprint was known to be good
    pub last_verified_at: DateTime<Utc>,
}

/// Anomalies of one pass, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnomalyReport {
    pub corrupted: Vec<Anomaly>,
    pub changed: Vec<Anomaly>,
}

impl AnomalyReport {
    /// File an anomaly under its classification. Non-anomalous
    /// classifications are ignored.
    pub fn record(&mut self, anomaly: Anomaly) {
        match anomaly.classification {
            Classification::Corrupted => self.corrupted.push(anomaly),
            Classification::Changed => self.changed.push(anomaly),
            Classification::New | Classification::Verified => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.corrupted.is_empty() && self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.corrupted.len() + self.changed.len()
    }
}

/// A file that could not be fingerprinted this pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: NormalizedPath,
    pub reason: String,
}

/// A file left out of the manifest on purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: NormalizedPath,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Larger than the size ceiling
    Oversized { size: u64 },
    /// The name is not valid UTF-8, so it has no manifest key. `path` holds
    /// a lossy rendering of it.
    UnencodableName,
}

/// Why a pass stopped before visiting every file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// The cancellation token was triggered
    Cancelled,
    /// The verification budget was used up
    Budget,
}

/// How far a pass got
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PassOutcome {
    /// Every current file was visited
    #[default]
    Completed,
    /// The loop stopped early; `remaining` files were not visited
    Stopped { reason: StopReason, remaining: usize },
}

impl PassOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PassOutcome::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            PassOutcome::Stopped {
                reason: StopReason::Cancelled,
                ..
            }
        )
    }
}

/// Summary of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Files eligible for verification
    pub total: usize,
    /// Files actually visited (including failures)
    pub visited: usize,
    pub new: usize,
    pub verified: usize,
    pub anomalies: AnomalyReport,
    pub failures: Vec<FileFailure>,
    pub skipped: Vec<SkippedFile>,
    pub outcome: PassOutcome,
}

impl ReconcileReport {
    pub fn count(&mut self, classification: Classification) {
        match classification {
            Classification::New => self.new += 1,
            Classification::Verified => self.verified += 1,
            Classification::Corrupted | Classification::Changed => {}
        }
    }
}
