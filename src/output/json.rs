//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Structured root-by-root apply and failure information

use crate::domain::{RootOutcome, RunReport};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether updates were applied before tidying
    update_mode: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-root outcomes
    roots: &'a [RootOutcome],
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Number of module roots visited
    roots_processed: usize,
    /// Number of updates applied across all roots
    updates_applied: usize,
    /// Number of updates that failed to apply
    apply_failures: usize,
    /// Number of roots with any failure
    roots_failed: usize,
}

impl JsonSummary {
    fn of(report: &RunReport) -> Self {
        Self {
            roots_processed: report.roots_processed(),
            updates_applied: report.updates_applied(),
            apply_failures: report.apply_failures(),
            roots_failed: report.failed_roots().count(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // Quiet mode trims the report down to the counts
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        let output = JsonOutput {
            update_mode: report.update_mode,
            summary: JsonSummary::of(report),
            roots: &report.roots,
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let json =
            serde_json::to_string_pretty(&JsonSummary::of(report)).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
