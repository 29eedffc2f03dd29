//! # Reconcile
//!
//! A small engine for declarative key/value settings application.
//!
//! This crate provides the core abstractions for declaring desired
//! configuration, validating each entry against a live settings store, and
//! converging the store to match - one key at a time, best effort.
//!
//! ## Core Concepts
//!
//! - **Declaration**: a desired `(SettingKey, SettingValue)` pair
//! - **SettingsBackend**: the façade over the external settings store
//! - **reconcile**: the linear pass that validates and applies declarations
//! - **Report**: ordered per-key outcomes for the caller to inspect
//!
//! ## Example
//!
//! ```ignore
//! use reconcile::{Declaration, reconcile};
//!
//! let declarations = vec![
//!     Declaration::set("org.gnome.desktop.interface", "color-scheme", "prefer-dark"),
//!     Declaration::set("org.gnome.desktop.interface", "enable-animations", false),
//! ];
//!
//! let backend = my_backend();
//! let report = reconcile(&backend, &declarations);
//!
//! if !report.is_success() {
//!     std::process::exit(1);
//! }
//! ```
//!
//! ## Design
//!
//! Declarations are independent: a missing schema or key records a skip, a
//! rejected write records a failure, and the pass always continues to the
//! next entry. There is no rollback and no atomicity across a set - every
//! write is individually idempotent, so a partially applied set is a safe,
//! resumable state and re-running the same set converges again.

pub mod backend;
pub mod declaration;
pub mod reconciler;
pub mod report;

// Re-export main types at crate root
pub use backend::{BackendError, SettingsBackend};
pub use declaration::{Declaration, SettingKey, SettingValue, parse_str_list};
pub use reconciler::reconcile;
pub use report::{Outcome, Report, ReportEntry, Summary};
