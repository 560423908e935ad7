//! Durable storage of the ledger
//!
//! The manifest lives at `<root>/.checkbits.json`. Loading copies it to
//! `<root>/.checkbits.json.backup` before a pass starts; a successful save
//! replaces the manifest atomically and removes the backup. At any moment
//! at least one of the two holds the ledger of the last completed pass.

mod manager;

pub use manager::{LedgerSource, LoadedLedger, PersistenceManager};
