//! One-off `set` / `get` against the live store.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::process::ExitCode;

use super::exit_code;
use crate::backend::GSettings;
use crate::cli::{GetArgs, SetArgs, ValueType};
use crate::session::SessionContext;
use crate::{Context, ui};
use reconcile::{Declaration, Outcome, SettingKey, SettingValue, SettingsBackend, parse_str_list};

pub fn set(ctx: &Context, args: SetArgs) -> Result<ExitCode> {
    let value = parse_value(&args.value, args.r#type)?;
    let key = setting_key(&args.schema, &args.key, args.path.as_deref());
    let declaration = Declaration::new(key, value);

    if !ctx.quiet {
        println!(
            "Setting {} {}",
            declaration.to_string().bold(),
            format!("({})", declaration.value.type_name()).dimmed()
        );
    }

    let session = SessionContext::detect()?;
    let backend = GSettings::new(session);
    let report = reconcile::reconcile(&backend, std::slice::from_ref(&declaration));

    if !ctx.quiet {
        for entry in report.entries() {
            match &entry.outcome {
                Outcome::Applied => println!("{}", "  ✓ Applied".green()),
                Outcome::SkippedMissingSchema => {
                    println!("  {} Skipped: schema not installed", "⊘".yellow());
                }
                Outcome::SkippedMissingKey => {
                    println!("  {} Skipped: key not declared", "⊘".yellow());
                }
                Outcome::Failed { error } => println!("  {} Failed: {}", "✗".red(), error),
            }
        }
    }

    Ok(exit_code(&report))
}

pub fn get(_ctx: &Context, args: GetArgs) -> Result<ExitCode> {
    let key = setting_key(&args.schema, &args.key, args.path.as_deref());

    let session = SessionContext::detect()?;
    let backend = GSettings::new(session);

    match backend.read(&key) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            ui::error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn setting_key(schema: &str, key: &str, path: Option<&str>) -> SettingKey {
    match path {
        Some(path) => SettingKey::relocatable(schema, path, key),
        None => SettingKey::new(schema, key),
    }
}

fn parse_value(value: &str, type_hint: Option<ValueType>) -> Result<SettingValue> {
    match type_hint {
        Some(ValueType::Bool) => {
            let b = parse_bool(value).ok_or_else(|| anyhow::anyhow!("Invalid boolean: {value}"))?;
            Ok(SettingValue::Bool(b))
        }
        Some(ValueType::Int) => {
            let i = value
                .parse::<i64>()
                .context(format!("Invalid integer: {value}"))?;
            Ok(SettingValue::Int(i))
        }
        Some(ValueType::String) => Ok(SettingValue::from(value)),
        Some(ValueType::List) => {
            let items =
                parse_str_list(value).ok_or_else(|| anyhow::anyhow!("Invalid list: {value}"))?;
            Ok(SettingValue::StrList(items))
        }
        None => {
            // Auto-detect
            if let Some(b) = parse_bool(value) {
                Ok(SettingValue::Bool(b))
            } else if let Ok(i) = value.parse::<i64>() {
                Ok(SettingValue::Int(i))
            } else if let Some(items) = parse_str_list(value) {
                Ok(SettingValue::StrList(items))
            } else {
                Ok(SettingValue::from(value))
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autodetects_scalars() {
        assert_eq!(parse_value("true", None).unwrap(), SettingValue::Bool(true));
        assert_eq!(parse_value("off", None).unwrap(), SettingValue::Bool(false));
        assert_eq!(parse_value("42", None).unwrap(), SettingValue::Int(42));
        assert_eq!(
            parse_value("prefer-dark", None).unwrap(),
            SettingValue::from("prefer-dark")
        );
    }

    #[test]
    fn autodetects_lists() {
        assert_eq!(
            parse_value("['a', 'b']", None).unwrap(),
            SettingValue::from(&["a", "b"][..])
        );
    }

    #[test]
    fn type_hint_wins_over_autodetection() {
        assert_eq!(
            parse_value("1", Some(ValueType::Int)).unwrap(),
            SettingValue::Int(1)
        );
        assert_eq!(
            parse_value("true", Some(ValueType::String)).unwrap(),
            SettingValue::from("true")
        );
    }

    #[test]
    fn invalid_typed_values_error() {
        assert!(parse_value("maybe", Some(ValueType::Bool)).is_err());
        assert!(parse_value("abc", Some(ValueType::Int)).is_err());
        assert!(parse_value("not-a-list", Some(ValueType::List)).is_err());
    }
}
