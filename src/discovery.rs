//! Update discovery
//!
//! Runs the toolchain's update listing for a module root and parses its
//! line-oriented output. Each non-blank line must be a
//! `name: current -> available` record; anything else fails the whole
//! discovery for that root, so a garbled listing never yields a partial
//! update set.

use crate::domain::DependencyUpdate;
use crate::error::DiscoveryError;
use crate::toolchain::DependencyManager;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

// One update record per line. Module paths cannot contain spaces or
// colons, so the greedy groups are unambiguous.
static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+): (.+) -> (.+)$").unwrap());

/// Lists the updatable direct dependencies of the module at `root`.
///
/// The listing command failure and every parse failure are fatal for this
/// root; blank lines (up-to-date modules render as empty template output)
/// are skipped. Nothing on disk is touched.
pub fn discover<M: DependencyManager>(
    manager: &M,
    root: &Path,
) -> Result<Vec<DependencyUpdate>, DiscoveryError> {
    let listing = manager.list_updates(root)?;
    parse_listing(&listing)
}

/// Parses the raw update listing into records, in input order
pub fn parse_listing(listing: &str) -> Result<Vec<DependencyUpdate>, DiscoveryError> {
    let mut updates = Vec::new();

    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let update = parse_record(line)?;
        debug!(
            name = %update.name,
            current = %update.current,
            available = %update.available,
            "found update"
        );
        if update.is_downgrade() {
            warn!(
                name = %update.name,
                current = %update.current,
                available = %update.available,
                "advertised version precedes the current one"
            );
        }
        updates.push(update);
    }

    Ok(updates)
}

fn parse_record(line: &str) -> Result<DependencyUpdate, DiscoveryError> {
    let caps = RECORD_RE
        .captures(line)
        .ok_or_else(|| DiscoveryError::malformed_record(line))?;

    let name = &caps[1];
    let current = caps[2]
        .parse()
        .map_err(|source| DiscoveryError::bad_version(name, &caps[2], source))?;
    let available = caps[3]
        .parse()
        .map_err(|source| DiscoveryError::bad_version(name, &caps[3], source))?;

    Ok(DependencyUpdate::new(name, current, available))
}
