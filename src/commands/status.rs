//! `settle status` - current vs desired values, without writing anything.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use crate::backend::GSettings;
use crate::cli::StatusArgs;
use crate::session::SessionContext;
use crate::{Context, profile, ui};
use reconcile::{Declaration, SettingsBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum KeyState {
    InSync,
    Differs,
    MissingSchema,
    MissingKey,
}

#[derive(Serialize)]
struct Row<'a> {
    declaration: &'a Declaration,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<String>,
    state: KeyState,
}

pub fn run(ctx: &Context, args: StatusArgs) -> Result<ExitCode> {
    let session = SessionContext::detect()?;
    let backend = GSettings::new(session);
    let declarations = profile::declarations();

    let rows: Vec<Row> = declarations.iter().map(|d| inspect(&backend, d)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(ExitCode::SUCCESS);
    }

    ui::header("Status");
    let mut in_sync = 0usize;
    for row in &rows {
        match row.state {
            KeyState::InSync => {
                in_sync += 1;
                if ctx.verbose > 0 {
                    println!(
                        "  {} {:<55} {}",
                        "✓".green(),
                        row.declaration.key.to_string(),
                        row.declaration.value.to_string().dimmed()
                    );
                }
            }
            KeyState::Differs => println!(
                "  {} {:<55} {} → {}",
                "~".yellow(),
                row.declaration.key.to_string(),
                row.current.as_deref().unwrap_or("?").dimmed(),
                row.declaration.value
            ),
            KeyState::MissingSchema => println!(
                "  {} {:<55} {}",
                "⊘".yellow(),
                row.declaration.key.to_string(),
                "schema not installed".dimmed()
            ),
            KeyState::MissingKey => println!(
                "  {} {:<55} {}",
                "⊘".yellow(),
                row.declaration.key.to_string(),
                "key not declared".dimmed()
            ),
        }
    }

    println!();
    let drift = rows
        .iter()
        .filter(|r| r.state == KeyState::Differs)
        .count();
    if drift == 0 {
        ui::success(&format!("{in_sync} keys in sync, no drift"));
    } else {
        ui::info(&format!("{in_sync} keys in sync, {drift} would change"));
    }

    Ok(ExitCode::SUCCESS)
}

fn inspect<'a>(backend: &dyn SettingsBackend, declaration: &'a Declaration) -> Row<'a> {
    let key = &declaration.key;

    if !backend.schema_exists(&key.schema) {
        return Row {
            declaration,
            current: None,
            state: KeyState::MissingSchema,
        };
    }
    if !backend.key_exists(&key.schema, &key.key) {
        return Row {
            declaration,
            current: None,
            state: KeyState::MissingKey,
        };
    }

    match backend.read(key) {
        Ok(current) => {
            let state = if normalize(&current) == declaration.value.render() {
                KeyState::InSync
            } else {
                KeyState::Differs
            };
            Row {
                declaration,
                current: Some(current),
                state,
            }
        }
        Err(_) => Row {
            declaration,
            current: None,
            state: KeyState::Differs,
        },
    }
}

/// Strip the type annotation the store prefixes onto non-canonical integer
/// types (`uint32 600`), so textual comparison against the rendered desired
/// value works.
fn normalize(current: &str) -> &str {
    const TYPE_PREFIXES: [&str; 8] = [
        "uint16", "int16", "uint32", "int32", "uint64", "int64", "byte", "double",
    ];
    for prefix in TYPE_PREFIXES {
        if let Some(rest) = current.strip_prefix(prefix) {
            if let Some(rest) = rest.strip_prefix(' ') {
                return rest;
            }
        }
    }
    current
}
