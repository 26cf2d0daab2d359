//! Report rendering
//!
//! Human-readable output for a finished run: one styled line per target, the
//! captured installer output for anything that failed, and a closing summary.
//! Discovery-phase skips go to stderr so automation piping stdout still sees
//! a clean report.

use console::Style;

use crate::discovery::DiscoveryReport;
use crate::dispatch::{InstallOutcome, OutcomeStatus, RunReport};

fn status_label(status: &OutcomeStatus) -> String {
    match status {
        OutcomeStatus::Success => Style::new().green().bold().apply_to("ok").to_string(),
        OutcomeStatus::Failed { code } => Style::new()
            .red()
            .bold()
            .apply_to(format!("failed (exit {code})"))
            .to_string(),
        OutcomeStatus::SpawnFailed { .. } => Style::new()
            .red()
            .bold()
            .apply_to("failed (could not start installer)")
            .to_string(),
        OutcomeStatus::TimedOut => Style::new()
            .red()
            .bold()
            .apply_to("failed (timed out)")
            .to_string(),
        OutcomeStatus::Cancelled => Style::new().yellow().apply_to("cancelled").to_string(),
    }
}

/// Warn about subdirectories discovery had to step over
pub fn render_skipped(discovery: &DiscoveryReport) {
    for skipped in &discovery.skipped {
        eprintln!(
            "{} skipped unreadable directory {}: {}",
            Style::new().yellow().apply_to("warning:"),
            skipped.path.display(),
            skipped.reason
        );
    }
}

fn render_failure_detail(outcome: &InstallOutcome) {
    println!();
    println!(
        "{} {}",
        Style::new().red().bold().apply_to("Failed:"),
        outcome.path.display()
    );
    if let OutcomeStatus::SpawnFailed { reason } = &outcome.status {
        println!("  {reason}");
    }
    for line in outcome.stdout.lines().chain(outcome.stderr.lines()) {
        println!("  {line}");
    }
}

/// Print the per-target lines, failure details, and summary
pub fn render_report(report: &RunReport) {
    for outcome in &report.outcomes {
        println!(
            "{} {}",
            status_label(&outcome.status),
            outcome.path.display()
        );
    }

    for outcome in report.outcomes.iter().filter(|o| !o.status.is_success()) {
        render_failure_detail(outcome);
    }

    println!();
    let total = report.outcomes.len();
    let failed = report.failed_count();
    if failed == 0 {
        println!(
            "{}",
            Style::new()
                .green()
                .bold()
                .apply_to(format!("Installed {total} of {total} packages"))
        );
    } else {
        println!(
            "{}",
            Style::new().red().bold().apply_to(format!(
                "Installed {} of {} packages, {} failed",
                total - failed,
                total,
                failed
            ))
        );
    }
}
