//! GSettings backend - read/write the GNOME settings store via its CLI.

use reconcile::{BackendError, SettingKey, SettingValue, SettingsBackend};
use std::process::{Command, Output};

use crate::session::SessionContext;

/// Backend over the `gsettings` command-line tool.
///
/// Stateless apart from the session context it was constructed with: every
/// query or write spawns one `gsettings` invocation routed through the
/// target user's session bus.
pub struct GSettings {
    session: SessionContext,
}

impl GSettings {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn run(&self, args: &[&str]) -> Result<Output, BackendError> {
        log::trace!("gsettings {}", args.join(" "));
        Command::new("gsettings")
            .env("DBUS_SESSION_BUS_ADDRESS", &self.session.bus_address)
            .args(args)
            .output()
            .map_err(|e| BackendError::Unavailable(format!("failed to run gsettings: {e}")))
    }
}

impl SettingsBackend for GSettings {
    fn schema_exists(&self, schema: &str) -> bool {
        match self.run(&["list-schemas"]) {
            Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
                .lines()
                .any(|line| line.trim() == schema),
            _ => false,
        }
    }

    fn key_exists(&self, schema: &str, key: &str) -> bool {
        match self.run(&["list-keys", schema]) {
            Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
                .lines()
                .any(|line| line.trim() == key),
            _ => false,
        }
    }

    fn write(&self, key: &SettingKey, value: &SettingValue) -> Result<(), BackendError> {
        let schema_arg = key.schema_arg();
        let rendered = value.render();
        let output = self.run(&["set", &schema_arg, &key.key, &rendered])?;

        if output.status.success() {
            return Ok(());
        }
        Err(classify(key, &String::from_utf8_lossy(&output.stderr)))
    }

    fn read(&self, key: &SettingKey) -> Result<String, BackendError> {
        let schema_arg = key.schema_arg();
        let output = self.run(&["get", &schema_arg, &key.key])?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }
        Err(classify(key, &String::from_utf8_lossy(&output.stderr)))
    }
}

/// Map gsettings stderr onto the backend error taxonomy.
fn classify(key: &SettingKey, stderr: &str) -> BackendError {
    let stderr = stderr.trim();

    if stderr.contains("No such schema") || stderr.contains("non-relocatable schema") {
        BackendError::SchemaNotFound(key.schema.clone())
    } else if stderr.contains("No such key") {
        BackendError::KeyNotFound(key.to_string())
    } else if stderr.contains("parse") || stderr.contains("type") {
        BackendError::TypeMismatch(stderr.to_string())
    } else {
        let detail = if stderr.is_empty() {
            "no error output".to_string()
        } else {
            stderr.to_string()
        };
        BackendError::Unavailable(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SettingKey {
        SettingKey::new("org.gnome.desktop.interface", "color-scheme")
    }

    #[test]
    fn classifies_missing_schema() {
        let error = classify(&key(), "No such schema “org.gnome.desktop.interface”\n");
        assert_eq!(
            error,
            BackendError::SchemaNotFound("org.gnome.desktop.interface".into())
        );
    }

    #[test]
    fn classifies_missing_key() {
        let error = classify(&key(), "No such key “color-scheme”\n");
        assert!(matches!(error, BackendError::KeyNotFound(_)));
    }

    #[test]
    fn classifies_type_errors() {
        let error = classify(&key(), "error: 0-3:can not parse as value of type 'b'\n");
        assert!(matches!(error, BackendError::TypeMismatch(_)));
    }

    #[test]
    fn everything_else_reads_as_unavailable() {
        let error = classify(&key(), "Failed to connect to socket /run/user/1000/bus\n");
        assert!(matches!(error, BackendError::Unavailable(_)));

        let error = classify(&key(), "");
        assert!(matches!(error, BackendError::Unavailable(_)));
    }
}
