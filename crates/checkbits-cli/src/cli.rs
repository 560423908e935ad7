//! CLI argument parsing using clap derive

use std::path::PathBuf;

use checkbits_core::CorruptionPolicy;
use clap::{Parser, ValueEnum};

/// checkbits - Detect silent corruption in a directory tree
///
/// Fingerprints every file under ROOT, compares it with the manifest kept in
/// ROOT/.checkbits.json and reports files whose content changed while their
/// modification time did not.
#[derive(Parser, Debug)]
#[command(name = "checkbits")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory tree to verify
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print a line for every verified file
    #[arg(short, long)]
    pub quiet: bool,

    /// Output the final report as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Stop after verifying this many files
    #[arg(long, value_name = "N", env = "CHECKBITS_MAX_FILES")]
    pub max_files: Option<usize>,

    /// What to do with files whose content changed but mtime did not
    #[arg(long, value_enum, value_name = "POLICY")]
    pub corruption_policy: Option<PolicyArg>,
}

/// Command-line spelling of [`CorruptionPolicy`]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Keep the last known-good fingerprint and report again next run
    Freeze,
    /// Accept the new content as the baseline
    Accept,
}

impl From<PolicyArg> for CorruptionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Freeze => CorruptionPolicy::Freeze,
            PolicyArg::Accept => CorruptionPolicy::Accept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn root_is_required() {
        assert!(Cli::try_parse_from(["checkbits"]).is_err());
    }

    #[test]
    fn parse_root_only() {
        let cli = Cli::parse_from(["checkbits", "/srv/photos"]);
        assert_eq!(cli.root, PathBuf::from("/srv/photos"));
        assert!(!cli.verbose);
        assert!(!cli.json);
        assert_eq!(cli.max_files, None);
        assert_eq!(cli.corruption_policy, None);
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::parse_from([
            "checkbits",
            "-v",
            "-q",
            "--json",
            "--max-files",
            "25",
            "--corruption-policy",
            "accept",
            "archive",
        ]);
        assert!(cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
        assert_eq!(cli.max_files, Some(25));
        assert_eq!(cli.corruption_policy, Some(PolicyArg::Accept));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = Cli::try_parse_from(["checkbits", "--corruption-policy", "ignore", "."]);
        assert!(result.is_err());
    }

    #[test]
    fn policy_arg_maps_to_core_policy() {
        assert_eq!(
            CorruptionPolicy::from(PolicyArg::Freeze),
            CorruptionPolicy::Freeze
        );
        assert_eq!(
            CorruptionPolicy::from(PolicyArg::Accept),
            CorruptionPolicy::Accept
        );
    }
}
