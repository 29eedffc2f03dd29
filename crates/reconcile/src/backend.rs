//! Backend seam: the trait the reconciler drives, and its error taxonomy.
//!
//! The trait keeps this crate free of any dependency on a concrete settings
//! store; the binary supplies an implementation that shells out to the real
//! store, tests supply a scripted one.

use crate::declaration::{SettingKey, SettingValue};
use thiserror::Error;

/// Errors surfaced by a backend write or read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The store does not recognize the schema.
    #[error("no such schema: {0}")]
    SchemaNotFound(String),

    /// The schema does not declare the key.
    #[error("no such key: {0}")]
    KeyNotFound(String),

    /// The value's type does not match the schema-declared type for the key.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The store cannot be reached (no session bus, missing tool, ...).
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Façade over the external settings store.
///
/// Implementations hold no mutable state across calls; every method maps to
/// one query or mutation of the live store. Existence queries never error -
/// an unreachable store reads as "not there", and only `write`/`read`
/// distinguish why.
pub trait SettingsBackend {
    /// Whether the store recognizes `schema`. Returns `false` on query
    /// failure rather than erroring.
    fn schema_exists(&self, schema: &str) -> bool;

    /// Whether `schema` declares `key`. Only meaningful when
    /// [`schema_exists`](Self::schema_exists) returned `true`.
    fn key_exists(&self, schema: &str, key: &str) -> bool;

    /// Set `key` to `value` in the live store.
    fn write(&self, key: &SettingKey, value: &SettingValue) -> Result<(), BackendError>;

    /// Read the store's current textual value for `key`.
    fn read(&self, key: &SettingKey) -> Result<String, BackendError>;
}
