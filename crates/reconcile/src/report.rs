//! Run report: ordered per-key outcomes and their aggregation.

use crate::declaration::Declaration;
use serde::Serialize;
use std::fmt;

/// Result of reconciling one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The value was written to the store.
    Applied,
    /// The store does not recognize the schema; nothing was written.
    SkippedMissingSchema,
    /// The schema exists but does not declare the key; nothing was written.
    SkippedMissingKey,
    /// The write was attempted and rejected.
    Failed { error: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkippedMissingSchema | Self::SkippedMissingKey)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::SkippedMissingSchema => f.write_str("skipped (schema not installed)"),
            Self::SkippedMissingKey => f.write_str("skipped (key not declared)"),
            Self::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// One reconciled declaration with its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub declaration: Declaration,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Aggregated counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    /// Success means nothing failed; skips are expected on systems that
    /// lack the optional schemas.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.failed
    }
}

/// Ordered collection of `(declaration, outcome)` entries for one run.
///
/// Entries appear in declaration input order. The report is append-only
/// during reconciliation and read-only afterwards.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, declaration: Declaration, outcome: Outcome) {
        self.entries.push(ReportEntry {
            declaration,
            outcome,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ReportEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for entry in &self.entries {
            match &entry.outcome {
                Outcome::Applied => summary.applied += 1,
                Outcome::SkippedMissingSchema | Outcome::SkippedMissingKey => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Whether the run succeeded (no failed entries).
    pub fn is_success(&self) -> bool {
        self.summary().is_success()
    }
}
