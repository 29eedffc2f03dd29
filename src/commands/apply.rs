//! `settle apply` - converge the live system to the built-in profile.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use super::{confirm_proceed, exit_code, outcome_glyph, print_report};
use crate::backend::GSettings;
use crate::cli::ApplyArgs;
use crate::session::SessionContext;
use crate::{Context, folders, profile, progress, scanner, ui};
use reconcile::{Declaration, Report, SettingsBackend};

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<ExitCode> {
    let session = SessionContext::detect()?;
    let backend = GSettings::new(session);

    let mut declarations = profile::declarations();
    if args.folders {
        let ids = scanner::desktop::scan(&scanner::desktop::default_app_dirs());
        let buckets = folders::partition(&ids);
        let existing = super::folders::existing_children(&backend);
        declarations.extend(folders::declarations(&buckets, &existing));
    }

    if !ctx.quiet {
        ui::header("Apply");
        ui::kv("user", &backend.session().user);
        ui::kv("declarations", &declarations.len().to_string());
    }

    if args.dry_run {
        println!();
        for declaration in &declarations {
            println!("  {} {}", "→".cyan(), declaration);
        }
        println!();
        println!("  {} Dry run - no changes made", "ℹ".blue());
        return Ok(ExitCode::SUCCESS);
    }

    if !args.yes && !confirm_proceed()? {
        println!();
        println!("  {} Aborted", "✗".red());
        return Ok(ExitCode::SUCCESS);
    }

    let report = reconcile_with_progress(&backend, &declarations);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }

    Ok(exit_code(&report))
}

/// Run the reconcile pass one declaration at a time so the bar can tick.
///
/// Declarations are independent, so feeding the engine single-entry slices
/// is the same pass it would make over the whole set.
fn reconcile_with_progress(backend: &dyn SettingsBackend, declarations: &[Declaration]) -> Report {
    let pb = progress::apply_bar(declarations.len() as u64, "Applying");
    let mut report = Report::with_capacity(declarations.len());

    for declaration in declarations {
        let single = reconcile::reconcile(backend, std::slice::from_ref(declaration));
        for entry in single.into_entries() {
            pb.set_message(format!(
                "{} {}",
                outcome_glyph(&entry.outcome),
                entry.declaration.key
            ));
            report.push(entry.declaration, entry.outcome);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    report
}
