//! ReconciliationEngine implementation
//!
//! Compares the files currently present under the root with the prior
//! ledger, re-fingerprints each of them and classifies the result. The
//! working ledger is a valid snapshot after every single file, so a pass
//! that stops early can still be saved.

use chrono::{DateTime, Utc};
use checkbits_fs::NormalizedPath;

use crate::config::{CorruptionPolicy, Settings};
use crate::context::ReconciliationContext;
use crate::ledger::{ChecksumEntry, ChecksumLedger, Lookup};

use super::observer::PassObserver;
use super::order::{RandomStart, StartSelector, rotated};
use super::probe::{FileProbe, LiveProbe, Observation};
use super::report::{
    Anomaly, Classification, FileFailure, PassOutcome, ReconcileReport, StopReason,
};

/// Updated ledger plus the report of the pass that produced it
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub ledger: ChecksumLedger,
    pub report: ReconcileReport,
}

/// Classify a fresh observation against what the ledger holds for the path.
///
/// A content change without a modification-time change is treated as
/// corruption: legitimate edits move the mtime, bit-rot and out-of-band
/// tampering usually do not.
pub fn classify(lookup: Lookup<'_>, observation: &Observation) -> Classification {
    match lookup {
        Lookup::Absent => Classification::New,
        Lookup::Present(entry) if entry.fingerprint == observation.fingerprint => {
            Classification::Verified
        }
        Lookup::Present(entry) if entry.file_modified_at == observation.modified_at => {
            Classification::Corrupted
        }
        Lookup::Present(_) => Classification::Changed,
    }
}

/// Engine for verifying a tree against its ledger
///
/// The file probe and the start selector are pluggable so passes can be
/// driven deterministically.
pub struct ReconciliationEngine {
    probe: Box<dyn FileProbe>,
    selector: Box<dyn StartSelector>,
}

impl ReconciliationEngine {
    /// Engine that reads files from disk and starts at a random index.
    pub fn new(settings: &Settings) -> Self {
        Self {
            probe: Box::new(LiveProbe::new(settings.max_file_size)),
            selector: Box::new(RandomStart),
        }
    }

    pub fn with_probe(mut self, probe: impl FileProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_selector(mut self, selector: impl StartSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Run one pass over `current` (paths relative to the context root).
    ///
    /// Entries for paths missing from `current` are dropped. The loop checks
    /// the context's cancellation token and the `max_files` budget before
    /// each file; on either, it stops and returns what it has.
    pub fn reconcile(
        &mut self,
        context: &ReconciliationContext,
        current: &[NormalizedPath],
        prior: ChecksumLedger,
        observer: &mut dyn PassObserver,
    ) -> Reconciliation {
        let mut ledger = prior.carry_forward(current);
        let mut report = ReconcileReport {
            total: current.len(),
            ..ReconcileReport::default()
        };

        if current.is_empty() {
            observer.on_finished(&report.outcome);
            return Reconciliation { ledger, report };
        }

        let settings = context.settings();
        let start = self.selector.select(current.len());
        tracing::debug!(start, total = current.len(), "Starting verification pass");

        for index in rotated(current.len(), start) {
            if let Some(reason) = stop_reason(context, settings, report.visited) {
                report.outcome = PassOutcome::Stopped {
                    reason,
                    remaining: current.len() - report.visited,
                };
                break;
            }

            let path = &current[index];
            report.visited += 1;

            match self.probe.observe(context.root(), path) {
                Ok(observation) => {
                    let (classification, last_verified_at) = apply(
                        &mut ledger,
                        path,
                        observation,
                        settings.corruption_policy,
                        Utc::now(),
                    );
                    tracing::debug!(path = %path, %classification, "Classified");

                    report.count(classification);
                    if let Some(last_verified_at) = last_verified_at {
                        report.anomalies.record(Anomaly {
                            path: path.clone(),
                            classification,
                            last_verified_at,
                        });
                    }
                    observer.on_classified(path, classification, last_verified_at);
                }
                Err(e) => {
                    tracing::warn!(path = %path, "Could not verify file: {}", e);
                    let reason = e.to_string();
                    observer.on_failure(path, &reason);
                    report.failures.push(FileFailure {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        if let PassOutcome::Stopped { reason, remaining } = report.outcome {
            tracing::info!(?reason, remaining, "Pass stopped early");
        }
        observer.on_finished(&report.outcome);
        Reconciliation { ledger, report }
    }
}

fn stop_reason(
    context: &ReconciliationContext,
    settings: &Settings,
    visited: usize,
) -> Option<StopReason> {
    if context.cancellation().is_cancelled() {
        Some(StopReason::Cancelled)
    } else if settings.max_files.is_some_and(|max| visited >= max) {
        Some(StopReason::Budget)
    } else {
        None
    }
}

/// Classify `observation` and update the working ledger accordingly.
///
/// Returns the classification and, for anomalies, the entry's previous
/// `verified_at`.
fn apply(
    ledger: &mut ChecksumLedger,
    path: &NormalizedPath,
    observation: Observation,
    policy: CorruptionPolicy,
    now: DateTime<Utc>,
) -> (Classification, Option<DateTime<Utc>>) {
    let lookup = ledger.lookup(path);
    let classification = classify(lookup, &observation);
    let last_verified_at = lookup
        .entry()
        .filter(|_| classification.is_anomaly())
        .map(|entry| entry.verified_at);

    match classification {
        Classification::New => {
            ledger.insert(
                path.clone(),
                ChecksumEntry::new(observation.fingerprint, observation.modified_at, now),
            );
        }
        Classification::Verified => {
            if let Some(entry) = ledger.get_mut(path) {
                entry.mark_verified(now);
            }
        }
        Classification::Corrupted => match policy {
            CorruptionPolicy::Freeze => {}
            CorruptionPolicy::Accept => {
                if let Some(entry) = ledger.get_mut(path) {
                    entry.rebaseline(observation.fingerprint, observation.modified_at, now);
                }
            }
        },
        Classification::Changed => {
            if let Some(entry) = ledger.get_mut(path) {
                entry.rebaseline(observation.fingerprint, observation.modified_at, now);
            }
        }
    }

    (classification, last_verified_at)
}
