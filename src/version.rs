//! Module version value type
//!
//! Go modules use canonical `v`-prefixed semantic versions:
//! - Release: `v1.2.3`
//! - Prerelease: `v1.2.3-beta.1`
//! - Build metadata: `v1.2.3+20260101`
//!
//! [`ModVersion`] strips the prefix on parse, re-emits it on display, and
//! layers two comparisons on top of [`semver::Version`]: precedence ordering
//! (which ignores build metadata) and field divergence (which names the
//! coarsest component two versions differ in).

use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed module version in Go's canonical `v`-prefixed form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModVersion(Version);

/// Version components, coarsest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionField {
    Major,
    Minor,
    Patch,
    Prerelease,
    Metadata,
}

impl ModVersion {
    /// Wraps an already-parsed semantic version
    pub fn new(version: Version) -> Self {
        ModVersion(version)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Prerelease identifiers, empty for release versions
    pub fn pre(&self) -> &str {
        self.0.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn build(&self) -> &str {
        self.0.build.as_str()
    }

    /// Returns true if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    /// Compares by SemVer precedence: numeric major/minor/patch, release
    /// above prerelease at an equal triple, prerelease identifiers by the
    /// SemVer rules. Build metadata never participates, so versions that
    /// differ only in metadata compare equal here even though `==` (and the
    /// derived total order) still tell them apart.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.0.cmp_precedence(&other.0)
    }

    /// Names the coarsest field in which the two versions differ, scanning
    /// major, minor, patch, prerelease, metadata in that order. `None` means
    /// the versions are identical in every field.
    pub fn divergence(&self, other: &Self) -> Option<VersionField> {
        if self.0.major != other.0.major {
            return Some(VersionField::Major);
        }
        if self.0.minor != other.0.minor {
            return Some(VersionField::Minor);
        }
        if self.0.patch != other.0.patch {
            return Some(VersionField::Patch);
        }
        if self.0.pre != other.0.pre {
            return Some(VersionField::Prerelease);
        }
        if self.0.build != other.0.build {
            return Some(VersionField::Metadata);
        }
        None
    }
}

impl FromStr for ModVersion {
    type Err = semver::Error;

    /// Parses `major.minor.patch[-pre][+build]`, with or without the
    /// leading `v`. Everything else is rejected by the semver grammar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        Ok(ModVersion(Version::parse(bare)?))
    }
}

impl fmt::Display for ModVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<ModVersion> for String {
    fn from(version: ModVersion) -> Self {
        version.to_string()
    }
}

impl TryFrom<String> for ModVersion {
    type Error = semver::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
