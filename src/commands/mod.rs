//! Subcommand implementations and their shared report plumbing.

pub mod apply;
pub mod folders;
pub mod settings;
pub mod status;

use crate::Context;
use crate::ui;
use anyhow::Result;
use colored::{ColoredString, Colorize};
use reconcile::{Outcome, Report};
use std::process::ExitCode;

/// Glyph for one outcome line.
pub(crate) fn outcome_glyph(outcome: &Outcome) -> ColoredString {
    match outcome {
        Outcome::Applied => "✓".green(),
        Outcome::SkippedMissingSchema | Outcome::SkippedMissingKey => "⊘".yellow(),
        Outcome::Failed { .. } => "✗".red(),
    }
}

/// Print per-key outcomes followed by the run summary.
pub(crate) fn print_report(ctx: &Context, report: &Report) {
    println!();
    for entry in report.entries() {
        if ctx.quiet && !entry.outcome.is_failure() {
            continue;
        }
        // skips only clutter a healthy run; show them when asked
        if entry.outcome.is_skip() && ctx.verbose == 0 && !ctx.quiet {
            continue;
        }
        println!(
            "  {} {:<55} {}",
            outcome_glyph(&entry.outcome),
            entry.declaration.key.to_string(),
            entry.outcome.to_string().dimmed()
        );
    }

    let summary = report.summary();
    println!();
    if summary.is_success() {
        ui::success(&format!(
            "{} applied, {} skipped",
            summary.applied, summary.skipped
        ));
    } else {
        ui::warn(&format!(
            "{} applied, {} skipped, {} failed",
            summary.applied, summary.skipped, summary.failed
        ));
    }
}

/// Map a report onto the process exit code: skips are fine, failures are not.
pub(crate) fn exit_code(report: &Report) -> ExitCode {
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Confirm with user
pub(crate) fn confirm_proceed() -> Result<bool> {
    use dialoguer::Confirm;

    let confirmed = Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()?;

    Ok(confirmed)
}
