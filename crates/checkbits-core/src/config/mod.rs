//! Per-tree settings
//!
//! Settings come from built-in defaults, optionally overridden by a
//! `.checkbits.toml` file at the tracked root. The CLI applies its flags on
//! top of whatever is loaded here.
//!
//! ```toml
//! max_file_size = 30000000
//! corruption_policy = "freeze"
//! max_files = 500
//! ```

mod settings;

pub use settings::{CorruptionPolicy, Settings};
