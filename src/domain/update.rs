//! Discovered dependency update

use crate::version::ModVersion;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A direct dependency for which the module proxy advertises another version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyUpdate {
    /// Module path of the dependency
    pub name: String,
    /// Version the manifest currently requires
    pub current: ModVersion,
    /// Version advertised upstream
    pub available: ModVersion,
}

impl DependencyUpdate {
    /// Creates a new dependency update
    pub fn new(name: impl Into<String>, current: ModVersion, available: ModVersion) -> Self {
        Self {
            name: name.into(),
            current,
            available,
        }
    }

    /// Returns true when the advertised version precedes the current one.
    /// A well-behaved listing never produces this, but a misconfigured
    /// proxy or a retracted release can.
    pub fn is_downgrade(&self) -> bool {
        self.available.cmp_precedence(&self.current) == Ordering::Less
    }
}

impl fmt::Display for DependencyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.current, self.available)
    }
}
