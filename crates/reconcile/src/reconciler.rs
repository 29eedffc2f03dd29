//! The reconcile pass: one outcome per declaration, in input order.

use crate::backend::SettingsBackend;
use crate::declaration::Declaration;
use crate::report::{Outcome, Report};

/// Reconcile `declarations` against the live store behind `backend`.
///
/// Each declaration is validated and applied independently, in input order:
/// a missing schema or key records a skip, a rejected write records the
/// error, and processing always continues to the next entry. Nothing here
/// aborts the run - declarations never depend on each other's outcomes.
///
/// The skip checks are what make the pass safe on heterogeneous systems: a
/// declaration for an extension that is not installed quietly records
/// `SkippedMissingSchema` instead of erroring the whole run.
pub fn reconcile(backend: &dyn SettingsBackend, declarations: &[Declaration]) -> Report {
    let mut report = Report::with_capacity(declarations.len());

    for declaration in declarations {
        let outcome = reconcile_one(backend, declaration);
        report.push(declaration.clone(), outcome);
    }

    report
}

fn reconcile_one(backend: &dyn SettingsBackend, declaration: &Declaration) -> Outcome {
    let key = &declaration.key;

    if !backend.schema_exists(&key.schema) {
        return Outcome::SkippedMissingSchema;
    }

    if !backend.key_exists(&key.schema, &key.key) {
        return Outcome::SkippedMissingKey;
    }

    match backend.write(key, &declaration.value) {
        Ok(()) => Outcome::Applied,
        Err(e) => Outcome::Failed {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, SettingsBackend};
    use crate::declaration::{SettingKey, SettingValue};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted in-memory backend: a fixed set of known (schema, key)
    /// pairs, optional per-key write failures, and a log of every write.
    #[derive(Default)]
    struct MockBackend {
        keys: HashMap<String, Vec<String>>,
        failures: HashMap<String, BackendError>,
        writes: RefCell<Vec<String>>,
    }

    impl MockBackend {
        fn with_schema(mut self, schema: &str, keys: &[&str]) -> Self {
            self.keys.insert(
                schema.to_string(),
                keys.iter().map(|k| (*k).to_string()).collect(),
            );
            self
        }

        fn failing(mut self, schema: &str, key: &str, error: BackendError) -> Self {
            self.failures.insert(format!("{schema}/{key}"), error);
            self
        }

        fn writes(&self) -> Vec<String> {
            self.writes.borrow().clone()
        }
    }

    impl SettingsBackend for MockBackend {
        fn schema_exists(&self, schema: &str) -> bool {
            self.keys.contains_key(schema)
        }

        fn key_exists(&self, schema: &str, key: &str) -> bool {
            self.keys
                .get(schema)
                .is_some_and(|keys| keys.iter().any(|k| k == key))
        }

        fn write(&self, key: &SettingKey, value: &SettingValue) -> Result<(), BackendError> {
            if let Some(error) = self.failures.get(&format!("{}/{}", key.schema, key.key)) {
                return Err(error.clone());
            }
            self.writes
                .borrow_mut()
                .push(format!("{} {} {}", key.schema_arg(), key.key, value.render()));
            Ok(())
        }

        fn read(&self, key: &SettingKey) -> Result<String, BackendError> {
            Err(BackendError::KeyNotFound(key.to_string()))
        }
    }

    fn sample_declarations() -> Vec<Declaration> {
        vec![
            Declaration::set("org.gnome.desktop.interface", "color-scheme", "prefer-dark"),
            Declaration::set("org.gnome.desktop.interface", "clock-show-weekday", true),
            Declaration::set("org.gnome.shell.extensions.dash-to-dock", "dock-fixed", true),
        ]
    }

    #[test]
    fn one_outcome_per_declaration_in_input_order() {
        let backend = MockBackend::default()
            .with_schema(
                "org.gnome.desktop.interface",
                &["color-scheme", "clock-show-weekday"],
            )
            .with_schema("org.gnome.shell.extensions.dash-to-dock", &["dock-fixed"]);

        let declarations = sample_declarations();
        let report = reconcile(&backend, &declarations);

        assert_eq!(report.len(), declarations.len());
        for (entry, declaration) in report.entries().iter().zip(&declarations) {
            assert_eq!(&entry.declaration, declaration);
            assert!(entry.outcome.is_applied());
        }
    }

    #[test]
    fn missing_schema_skips_without_writing() {
        let backend = MockBackend::default().with_schema(
            "org.gnome.desktop.interface",
            &["color-scheme", "clock-show-weekday"],
        );

        let report = reconcile(&backend, &sample_declarations());

        assert_eq!(
            report.entries()[2].outcome,
            Outcome::SkippedMissingSchema,
            "dash-to-dock schema is not installed"
        );
        // only the two interface keys reached the store
        assert_eq!(backend.writes().len(), 2);
        assert!(report.is_success());
    }

    #[test]
    fn missing_key_skips_without_writing() {
        let backend =
            MockBackend::default().with_schema("org.gnome.desktop.interface", &["color-scheme"]);

        let declarations = vec![Declaration::set(
            "org.gnome.desktop.interface",
            "no-such-key",
            true,
        )];
        let report = reconcile(&backend, &declarations);

        assert_eq!(report.entries()[0].outcome, Outcome::SkippedMissingKey);
        assert!(backend.writes().is_empty());
    }

    #[test]
    fn failed_write_is_recorded_and_the_run_continues() {
        let backend = MockBackend::default()
            .with_schema(
                "org.gnome.desktop.interface",
                &["color-scheme", "clock-show-weekday"],
            )
            .failing(
                "org.gnome.desktop.interface",
                "color-scheme",
                BackendError::TypeMismatch("expected string".into()),
            );

        let declarations = vec![
            Declaration::set("org.gnome.desktop.interface", "color-scheme", 4),
            Declaration::set("org.gnome.desktop.interface", "clock-show-weekday", true),
        ];
        let report = reconcile(&backend, &declarations);

        assert!(report.entries()[0].outcome.is_failure());
        assert!(report.entries()[1].outcome.is_applied());
        assert!(!report.is_success());
        assert_eq!(report.summary().failed, 1);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let backend = MockBackend::default().with_schema(
            "org.gnome.desktop.interface",
            &["color-scheme", "clock-show-weekday"],
        );
        let declarations = vec![
            Declaration::set("org.gnome.desktop.interface", "color-scheme", "prefer-dark"),
            Declaration::set("org.gnome.desktop.interface", "clock-show-weekday", true),
        ];

        for _ in 0..2 {
            let report = reconcile(&backend, &declarations);
            assert!(
                report.entries().iter().all(|e| e.outcome.is_applied()),
                "every entry applies on every run"
            );
        }
        assert_eq!(backend.writes().len(), 4);
    }

    #[test]
    fn relocatable_keys_carry_their_path_to_the_store() {
        let backend = MockBackend::default()
            .with_schema("org.gnome.desktop.app-folders.folder", &["name"]);

        let declarations = vec![Declaration::set_at(
            "org.gnome.desktop.app-folders.folder",
            "/org/gnome/desktop/app-folders/folders/A-E/",
            "name",
            "A-E",
        )];
        let report = reconcile(&backend, &declarations);

        assert!(report.entries()[0].outcome.is_applied());
        assert_eq!(
            backend.writes(),
            vec![
                "org.gnome.desktop.app-folders.folder:/org/gnome/desktop/app-folders/folders/A-E/ name 'A-E'"
            ]
        );
    }
}
