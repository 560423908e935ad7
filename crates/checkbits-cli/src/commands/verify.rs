//! Verify command implementation

use chrono::{DateTime, Utc};
use checkbits_core::{
    Anomaly, CancellationToken, Checker, Classification, LedgerSource, PassObserver, PassOutcome,
    PassSummary, ReconciliationContext, Settings, SilentObserver, SkipReason, SkippedFile,
    StopReason,
};
use checkbits_fs::NormalizedPath;
use colored::Colorize;
use serde_json::json;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Exit status of a pass that completed or used up its budget
pub const EXIT_OK: i32 = 0;
/// Exit status of a pass stopped by Ctrl-C (conventional 128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Run one verification pass over `cli.root` and return the exit status.
pub fn run_verify(cli: &Cli, cancellation: CancellationToken) -> Result<i32> {
    let context = build_context(cli, cancellation)?;
    let root = context.root().to_path_buf();
    let mut checker = Checker::new(context);

    let summary = if cli.json {
        checker.run(&mut SilentObserver)?
    } else {
        println!("{} {}", "Checking".bold(), root.display().to_string().cyan());
        println!();
        let mut observer = ConsoleObserver { quiet: cli.quiet };
        checker.run(&mut observer)?
    };

    if cli.json {
        let output = json!({
            "root": root.display().to_string(),
            "source": summary.source,
            "entries": summary.entries,
            "report": summary.report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&summary);
    }

    Ok(exit_code(&summary.report.outcome))
}

/// Resolve settings from the root's settings file, then apply flag overrides.
fn build_context(cli: &Cli, cancellation: CancellationToken) -> Result<ReconciliationContext> {
    if cli.max_files == Some(0) {
        return Err(CliError::user("--max-files must be at least 1"));
    }

    let mut context =
        ReconciliationContext::new(&cli.root, Settings::default())?.with_cancellation(cancellation);
    let mut settings = Settings::load(context.root())?;
    if let Some(max_files) = cli.max_files {
        settings.max_files = Some(max_files);
    }
    if let Some(policy) = cli.corruption_policy {
        settings.corruption_policy = policy.into();
    }
    tracing::debug!(?settings, "Resolved settings");
    *context.settings_mut() = settings;
    Ok(context)
}

fn exit_code(outcome: &PassOutcome) -> i32 {
    if outcome.is_cancelled() {
        EXIT_INTERRUPTED
    } else {
        EXIT_OK
    }
}

/// Prints one line per file as the pass runs.
struct ConsoleObserver {
    quiet: bool,
}

impl PassObserver for ConsoleObserver {
    fn on_skip(&mut self, skipped: &SkippedFile) {
        let why = match skipped.reason {
            SkipReason::Oversized { size } => format!("{size} bytes, over size limit"),
            SkipReason::UnencodableName => "name is not valid UTF-8".to_string(),
        };
        println!("  {} {} ({})", "skip".yellow(), skipped.path, why);
    }

    fn on_classified(
        &mut self,
        path: &NormalizedPath,
        classification: Classification,
        last_verified_at: Option<DateTime<Utc>>,
    ) {
        match classification {
            Classification::New => println!("  {} {}", "new".green(), path),
            Classification::Verified => {
                if !self.quiet {
                    println!("  {} {}", "verified".dimmed(), path);
                }
            }
            Classification::Corrupted => println!(
                "  {} {}{}",
                "CORRUPTED".red().bold(),
                path,
                last_good(last_verified_at)
            ),
            Classification::Changed => println!(
                "  {} {}{}",
                "changed".yellow(),
                path,
                last_good(last_verified_at)
            ),
        }
    }

    fn on_failure(&mut self, path: &NormalizedPath, reason: &str) {
        println!("  {} {}: {}", "failed".red(), path, reason);
    }

    fn on_finished(&mut self, outcome: &PassOutcome) {
        if let PassOutcome::Stopped { reason, remaining } = outcome {
            println!();
            match reason {
                StopReason::Cancelled => println!(
                    "{} {} files not checked this run",
                    "Interrupted:".yellow().bold(),
                    remaining
                ),
                StopReason::Budget => println!(
                    "{} {} files left for a later run",
                    "Budget reached:".yellow().bold(),
                    remaining
                ),
            }
        }
    }
}

fn last_good(last_verified_at: Option<DateTime<Utc>>) -> String {
    match last_verified_at {
        Some(at) => format!(" (last verified {})", timestamp(at)).dimmed().to_string(),
        None => String::new(),
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn print_summary(summary: &PassSummary) {
    let report = &summary.report;

    println!();
    println!("{}", "Summary".bold());
    println!("  {}:     {}", "Files".dimmed(), report.total);
    println!("  {}:  {}", "Verified".dimmed(), report.verified);
    println!("  {}:       {}", "New".dimmed(), report.new);
    println!("  {}:   {}", "Changed".dimmed(), report.anomalies.changed.len());
    println!("  {}: {}", "Corrupted".dimmed(), report.anomalies.corrupted.len());
    println!("  {}:    {}", "Failed".dimmed(), report.failures.len());
    println!("  {}:   {}", "Skipped".dimmed(), report.skipped.len());

    print_anomalies("Changed files", &report.anomalies.changed);
    print_anomalies("Corrupted files", &report.anomalies.corrupted);

    println!();
    if summary.source == LedgerSource::Backup {
        println!(
            "{} manifest was recovered from its backup",
            "Note:".yellow().bold()
        );
    }
    println!("Manifest saved ({} entries)", summary.entries);

    if report.anomalies.corrupted.is_empty() {
        println!("{}", "No corruption detected".green());
    } else {
        println!(
            "{}",
            format!(
                "{} corrupted file(s) found",
                report.anomalies.corrupted.len()
            )
            .red()
            .bold()
        );
    }
}

fn print_anomalies(title: &str, anomalies: &[Anomaly]) {
    if anomalies.is_empty() {
        return;
    }
    println!();
    println!("{}:", title.bold());
    for anomaly in anomalies {
        println!(
            "  {} (last verified {})",
            anomaly.path,
            timestamp(anomaly.last_verified_at)
        );
    }
}
