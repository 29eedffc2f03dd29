//! `settle folders` - group installed applications into alphabetic folders.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::{confirm_proceed, exit_code, print_report};
use crate::backend::GSettings;
use crate::cli::FoldersArgs;
use crate::session::SessionContext;
use crate::{Context, folders, scanner, ui};
use reconcile::{SettingKey, SettingsBackend, parse_str_list};

pub fn run(ctx: &Context, args: FoldersArgs) -> Result<ExitCode> {
    let mut app_dirs = scanner::desktop::default_app_dirs();
    for dir in &args.app_dirs {
        app_dirs.push(PathBuf::from(shellexpand::tilde(dir).as_ref()));
    }

    let ids = scanner::desktop::scan(&app_dirs);
    if ids.is_empty() {
        ui::warn("No application descriptors found");
        return Ok(ExitCode::SUCCESS);
    }

    let buckets = folders::partition(&ids);

    if !ctx.quiet {
        ui::header("App folders");
        for bucket in &buckets {
            println!(
                "  {} {}",
                bucket.id.bold(),
                format!("({} apps)", bucket.members.len()).dimmed()
            );
            if ctx.verbose > 0 {
                for member in &bucket.members {
                    ui::dim(&format!("    {member}"));
                }
            }
        }
    }

    let session = SessionContext::detect()?;
    let backend = GSettings::new(session);
    let existing = existing_children(&backend);
    let declarations = folders::declarations(&buckets, &existing);

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

    let report = reconcile::reconcile(&backend, &declarations);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }

    Ok(exit_code(&report))
}

/// Folder ids already present on the system, so a run extends the layout
/// instead of clobbering folders created elsewhere. An unreachable store
/// reads as no existing folders.
pub(crate) fn existing_children(backend: &dyn SettingsBackend) -> Vec<String> {
    let key = SettingKey::new(folders::APP_FOLDERS_SCHEMA, "folder-children");
    match backend.read(&key) {
        Ok(text) => parse_str_list(&text).unwrap_or_default(),
        Err(e) => {
            log::debug!("could not read existing folder-children: {e}");
            Vec::new()
        }
    }
}
