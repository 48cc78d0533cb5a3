//! Text output formatter for human-readable display
//!
//! This module provides:
//! - End-of-run summary with severity breakdown
//! - Failure listing naming each root and dependency that went wrong
//! - Per-root status breakdown in verbose mode

use crate::domain::RunReport;
use crate::format::Severity;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Count applied updates by severity
    fn count_by_severity(&self, report: &RunReport) -> (usize, usize, usize, usize, usize) {
        let mut major = 0;
        let mut minor = 0;
        let mut patch = 0;
        let mut prerelease = 0;
        let mut unchanged = 0;

        for root in &report.roots {
            for outcome in root.updates.iter().filter(|o| o.is_applied()) {
                match Severity::of(outcome.update()) {
                    Severity::Major => major += 1,
                    Severity::Minor => minor += 1,
                    Severity::Patch => patch += 1,
                    Severity::Prerelease => prerelease += 1,
                    Severity::Unchanged => unchanged += 1,
                }
            }
        }

        (major, minor, patch, prerelease, unchanged)
    }

    /// Severity breakdown as "(1 major, 3 minor)" style parts
    fn severity_parts(&self, report: &RunReport) -> Vec<String> {
        let (major, minor, patch, prerelease, unchanged) = self.count_by_severity(report);

        let mut parts = Vec::new();
        for (count, severity) in [
            (major, Severity::Major),
            (minor, Severity::Minor),
            (patch, Severity::Patch),
            (prerelease, Severity::Prerelease),
            (unchanged, Severity::Unchanged),
        ] {
            if count == 0 {
                continue;
            }
            let painted = if self.color {
                match severity {
                    Severity::Major => count.to_string().magenta().to_string(),
                    Severity::Minor => count.to_string().yellow().to_string(),
                    Severity::Patch => count.to_string().green().to_string(),
                    Severity::Prerelease => count.to_string().red().to_string(),
                    Severity::Unchanged => count.to_string().dimmed().to_string(),
                }
            } else {
                count.to_string()
            };
            parts.push(format!("{} {}", painted, severity.label()));
        }
        parts
    }

    /// Write one line per failure, naming the root and what went wrong
    fn format_failures(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if !report.has_failures() {
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}:", "Failures".red().bold())?;
        } else {
            writeln!(writer, "Failures:")?;
        }

        for root in report.failed_roots() {
            let path = root.root.display();
            for outcome in root.updates.iter().filter(|o| o.is_failure()) {
                let line = format!("{}: {}", path, outcome);
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), line)?;
                } else {
                    writeln!(writer, "  - {}", line)?;
                }
            }
            if let Some(failure) = &root.failure {
                let line = format!("{}: {}", path, failure);
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), line)?;
                } else {
                    writeln!(writer, "  - {}", line)?;
                }
            }
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show the one-line summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        self.format_failures(report, writer)?;
        self.format_summary(report, writer)?;

        Ok(())
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let roots = report.roots_processed();
        let applied = report.updates_applied();
        let apply_failures = report.apply_failures();
        let failed_roots = report.failed_roots().count();

        if self.verbosity == Verbosity::Quiet {
            // Minimal output
            if failed_roots > 0 {
                if self.color {
                    writeln!(
                        writer,
                        "{} root(s) failed",
                        failed_roots.to_string().red()
                    )?;
                } else {
                    writeln!(writer, "{} root(s) failed", failed_roots)?;
                }
            } else if report.update_mode && applied > 0 {
                if self.color {
                    writeln!(writer, "{} updated", applied.to_string().green())?;
                } else {
                    writeln!(writer, "{} updated", applied)?;
                }
            } else if self.color {
                writeln!(writer, "{}", "All modules tidy".dimmed())?;
            } else {
                writeln!(writer, "All modules tidy")?;
            }
            return Ok(());
        }

        // Normal/verbose output
        if self.color {
            writeln!(writer, "{}:", "Summary".bold())?;
            writeln!(writer, "  {} root(s) processed", roots.to_string().cyan())?;
        } else {
            writeln!(writer, "Summary:")?;
            writeln!(writer, "  {} root(s) processed", roots)?;
        }

        if report.update_mode {
            if applied > 0 {
                let parts = self.severity_parts(report);
                let count = if self.color {
                    applied.to_string().green().to_string()
                } else {
                    applied.to_string()
                };
                writeln!(
                    writer,
                    "  {} update(s) applied ({})",
                    count,
                    parts.join(", ")
                )?;
            } else if self.color {
                writeln!(writer, "  {}", "No updates applied".dimmed())?;
            } else {
                writeln!(writer, "  No updates applied")?;
            }

            if apply_failures > 0 {
                let count = if self.color {
                    apply_failures.to_string().red().to_string()
                } else {
                    apply_failures.to_string()
                };
                writeln!(writer, "  {} update(s) failed to apply", count)?;
            }
        }

        if failed_roots > 0 {
            let count = if self.color {
                failed_roots.to_string().red().to_string()
            } else {
                failed_roots.to_string()
            };
            writeln!(writer, "  {} root(s) failed", count)?;
        }

        // Verbose: per-root status breakdown
        if self.verbosity == Verbosity::Verbose {
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}:", "By root".dimmed())?;
            } else {
                writeln!(writer, "By root:")?;
            }
            for root in &report.roots {
                let status = match &root.failure {
                    Some(failure) => failure.to_string(),
                    None if root.failed_count() > 0 => {
                        format!("{} update(s) failed to apply", root.failed_count())
                    }
                    None => "ok".to_string(),
                };
                if self.color {
                    let painted = if root.succeeded() {
                        status.green().to_string()
                    } else {
                        status.red().to_string()
                    };
                    writeln!(
                        writer,
                        "  {}: {}",
                        root.root.display().to_string().cyan(),
                        painted
                    )?;
                } else {
                    writeln!(writer, "  {}: {}", root.root.display(), status)?;
                }
            }
        }

        Ok(())
    }
}
