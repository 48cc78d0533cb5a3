//! Update application
//!
//! This module provides:
//! - Sequential application of discovered updates within one module root
//! - Column-aligned progress rows for each dependency being fetched
//! - Per-update failure capture that never interrupts the batch
//!
//! A failed fetch is recorded in the returned outcomes and the batch moves
//! on to the next dependency; the module root keeps whatever the toolchain
//! managed to write before the failure.

use crate::domain::{ApplyOutcome, DependencyUpdate};
use crate::format::{self, UpdateRenderer};
use crate::toolchain::DependencyManager;
use std::io::Write;
use std::path::Path;
use tracing::error;

/// Apply a batch of updates to a single module root.
///
/// Each update is fetched through the dependency manager in listing order.
/// One row per dependency is written to `out`, with names and version
/// deltas padded into aligned columns across the batch.
pub fn apply_updates<M: DependencyManager>(
    manager: &M,
    root: &Path,
    updates: &[DependencyUpdate],
    renderer: &UpdateRenderer,
    out: &mut dyn Write,
) -> std::io::Result<Vec<ApplyOutcome>> {
    let name_width = format::max_name_width(updates);
    let delta_width = format::max_delta_width(updates);

    let mut outcomes = Vec::with_capacity(updates.len());
    for update in updates {
        writeln!(
            out,
            "Updating {} to version {}...",
            renderer.name(update, name_width),
            renderer.delta(update, delta_width)
        )?;

        match manager.fetch(root, &update.name) {
            Ok(()) => outcomes.push(ApplyOutcome::applied(update.clone())),
            Err(err) => {
                let output = err.output().unwrap_or_default().to_string();
                error!(
                    name = %update.name,
                    error = %err,
                    output = %output,
                    "failed to fetch update"
                );
                outcomes.push(ApplyOutcome::failed(update.clone(), err.to_string(), output));
            }
        }
    }
    Ok(outcomes)
}
