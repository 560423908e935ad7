//! Command implementations for checkbits-cli

pub mod verify;

pub use verify::{EXIT_INTERRUPTED, EXIT_OK, run_verify};
