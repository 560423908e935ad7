//! One full run: load, inventory, reconcile, save
//!
//! The Checker wires the persistence manager, the file inventory and the
//! reconciliation engine together for a single root.

use checkbits_fs::{FileInventory, Inventory, InventoryEntry, NormalizedPath, UnreadablePath};
use serde::Serialize;

use crate::Result;
use crate::context::ReconciliationContext;
use crate::persistence::{LedgerSource, PersistenceManager};
use crate::ledger::ChecksumEntry;
use crate::reconcile::{
    FileFailure, PassObserver, ReconcileReport, ReconciliationEngine, SkipReason, SkippedFile,
};

/// Result of a run whose manifest was saved
#[derive(Debug, Clone, Serialize)]
pub struct PassSummary {
    /// Where the prior ledger was loaded from
    pub source: LedgerSource,
    /// Number of entries in the saved manifest
    pub entries: usize,
    pub report: ReconcileReport,
}

/// Runs reconciliation passes for one tracked root.
pub struct Checker {
    context: ReconciliationContext,
    engine: ReconciliationEngine,
    persistence: PersistenceManager,
}

impl Checker {
    /// Create a checker with the default engine and persistence settings.
    pub fn new(context: ReconciliationContext) -> Self {
        let engine = ReconciliationEngine::new(context.settings());
        let persistence = PersistenceManager::new(context.root());
        Self {
            context,
            engine,
            persistence,
        }
    }

    /// Replace the engine, e.g. to inject a deterministic start selector.
    pub fn with_engine(mut self, engine: ReconciliationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_persistence(mut self, persistence: PersistenceManager) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn context(&self) -> &ReconciliationContext {
        &self.context
    }

    pub fn persistence(&self) -> &PersistenceManager {
        &self.persistence
    }

    /// Run one pass and save the resulting ledger.
    ///
    /// A pass stopped by cancellation or by the verification budget is
    /// saved like a completed one; its outcome is in the report.
    ///
    /// # Errors
    ///
    /// Fails only if the root cannot be enumerated or the manifest cannot be
    /// written. Per-file problems are reported, not returned.
    pub fn run(&mut self, observer: &mut dyn PassObserver) -> Result<PassSummary> {
        let inventory = FileInventory::new(self.context.root())
            .with_max_file_size(self.context.settings().max_file_size)
            .collect()?;
        self.run_inventory(inventory, observer)
    }

    /// Reconcile an already collected inventory against the stored ledger.
    ///
    /// Entries at or below a path the walk could not read are kept as they
    /// were; those paths were not seen, not deleted.
    fn run_inventory(
        &mut self,
        inventory: Inventory,
        observer: &mut dyn PassObserver,
    ) -> Result<PassSummary> {
        let loaded = self.persistence.load();

        let mut current: Vec<NormalizedPath> = Vec::new();
        let mut skipped = Vec::new();
        for entry in inventory.entries {
            let skip = match entry {
                InventoryEntry::Eligible(path) => {
                    current.push(path);
                    continue;
                }
                InventoryEntry::Oversized { path, size } => SkippedFile {
                    path,
                    reason: SkipReason::Oversized { size },
                },
                InventoryEntry::UnencodableName(path) => SkippedFile {
                    path,
                    reason: SkipReason::UnencodableName,
                },
            };
            observer.on_skip(&skip);
            skipped.push(skip);
        }

        let mut unreadable = Vec::with_capacity(inventory.unreadable.len());
        let mut walk_failures = Vec::with_capacity(inventory.unreadable.len());
        for UnreadablePath { path, message } in inventory.unreadable {
            observer.on_failure(&path, &message);
            unreadable.push(path.clone());
            walk_failures.push(FileFailure {
                path,
                reason: message,
            });
        }
        let unseen: Vec<(NormalizedPath, ChecksumEntry)> = loaded
            .ledger
            .entries_under(&unreadable)
            .map(|(path, entry)| (path.clone(), entry.clone()))
            .collect();
        tracing::debug!(
            eligible = current.len(),
            skipped = skipped.len(),
            unreadable = unreadable.len(),
            unseen = unseen.len(),
            "Inventory complete"
        );

        let mut reconciliation =
            self.engine
                .reconcile(&self.context, &current, loaded.ledger, observer);
        for (path, entry) in unseen {
            if !reconciliation.ledger.contains(&path) {
                reconciliation.ledger.insert(path, entry);
            }
        }
        reconciliation.report.skipped = skipped;
        walk_failures.append(&mut reconciliation.report.failures);
        reconciliation.report.failures = walk_failures;

        self.persistence.save(&reconciliation.ledger)?;

        Ok(PassSummary {
            source: loaded.source,
            entries: reconciliation.ledger.len(),
            report: reconciliation.report,
        })
    }
}
