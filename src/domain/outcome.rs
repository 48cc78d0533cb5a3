//! Per-root and per-run outcome records
//!
//! Provides structures for tracking what happened at each module root and
//! aggregating them into the overall run report.

use super::DependencyUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result of applying one discovered update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// The fetch succeeded and the manifest now requires the new version
    Applied {
        /// The update that was applied
        update: DependencyUpdate,
    },
    /// The fetch failed; remaining updates are still attempted
    Failed {
        /// The update that could not be applied
        update: DependencyUpdate,
        /// Error description from the failed fetch
        detail: String,
        /// Combined stdout/stderr of the fetch, when captured
        output: String,
    },
}

impl ApplyOutcome {
    /// Creates an Applied outcome
    pub fn applied(update: DependencyUpdate) -> Self {
        ApplyOutcome::Applied { update }
    }

    /// Creates a Failed outcome
    pub fn failed(
        update: DependencyUpdate,
        detail: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        ApplyOutcome::Failed {
            update,
            detail: detail.into(),
            output: output.into(),
        }
    }

    /// Returns true if the update was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }

    /// Returns true if the fetch failed
    pub fn is_failure(&self) -> bool {
        matches!(self, ApplyOutcome::Failed { .. })
    }

    /// Returns the update this outcome refers to
    pub fn update(&self) -> &DependencyUpdate {
        match self {
            ApplyOutcome::Applied { update } => update,
            ApplyOutcome::Failed { update, .. } => update,
        }
    }
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyOutcome::Applied { update } => {
                write!(f, "{}: updated to {}", update.name, update.available)
            }
            ApplyOutcome::Failed { update, detail, .. } => {
                write!(f, "{}: failed ({})", update.name, detail)
            }
        }
    }
}

/// Why a module root failed outside of the individual fetches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "detail", rename_all = "snake_case")]
pub enum RootFailure {
    /// The update listing could not be produced or parsed
    Discovery(String),
    /// The manifest reconciliation command failed
    Tidy(String),
}

impl fmt::Display for RootFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootFailure::Discovery(detail) => write!(f, "discovery failed: {}", detail),
            RootFailure::Tidy(detail) => write!(f, "tidy failed: {}", detail),
        }
    }
}

/// Everything that happened while processing one module root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootOutcome {
    /// Directory containing the module manifest
    pub root: PathBuf,
    /// Per-dependency apply results, in listing order
    pub updates: Vec<ApplyOutcome>,
    /// Failure outside the per-dependency applies, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<RootFailure>,
}

impl RootOutcome {
    /// Creates an outcome for a root with nothing recorded yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            updates: Vec::new(),
            failure: None,
        }
    }

    /// Attaches the apply outcomes (builder pattern)
    pub fn with_updates(mut self, updates: Vec<ApplyOutcome>) -> Self {
        self.updates = updates;
        self
    }

    /// Attaches a root-level failure (builder pattern)
    pub fn with_failure(mut self, failure: RootFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Returns the number of updates applied at this root
    pub fn applied_count(&self) -> usize {
        self.updates.iter().filter(|u| u.is_applied()).count()
    }

    /// Returns the number of fetches that failed at this root
    pub fn failed_count(&self) -> usize {
        self.updates.iter().filter(|u| u.is_failure()).count()
    }

    /// A root succeeded when nothing at all went wrong: no discovery or
    /// tidy failure and no failed fetch
    pub fn succeeded(&self) -> bool {
        self.failure.is_none() && self.failed_count() == 0
    }
}

/// Overall report for one run across every discovered root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-root outcomes, in traversal order
    pub roots: Vec<RootOutcome>,
    /// Whether update discovery and application ran
    pub update_mode: bool,
}

impl RunReport {
    /// Creates an empty report
    pub fn new(update_mode: bool) -> Self {
        Self {
            roots: Vec::new(),
            update_mode,
        }
    }

    /// Appends a root outcome
    pub fn add_root(&mut self, outcome: RootOutcome) {
        self.roots.push(outcome);
    }

    /// Returns the number of roots processed
    pub fn roots_processed(&self) -> usize {
        self.roots.len()
    }

    /// Returns the total number of updates applied
    pub fn updates_applied(&self) -> usize {
        self.roots.iter().map(|r| r.applied_count()).sum()
    }

    /// Returns the total number of failed fetches
    pub fn apply_failures(&self) -> usize {
        self.roots.iter().map(|r| r.failed_count()).sum()
    }

    /// Returns the roots that did not fully succeed
    pub fn failed_roots(&self) -> impl Iterator<Item = &RootOutcome> {
        self.roots.iter().filter(|r| !r.succeeded())
    }

    /// Returns true if any root did not fully succeed
    pub fn has_failures(&self) -> bool {
        self.roots.iter().any(|r| !r.succeeded())
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new(false)
    }
}
