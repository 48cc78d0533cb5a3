//! Severity classification and colorized update rendering
//!
//! This module provides:
//! - [`Severity`], the semantic weight of an update derived from the
//!   coarsest diverging version field
//! - [`UpdateRenderer`], which turns an update into the padded, colored
//!   name and version-delta columns printed while applying
//!
//! Classification is pure; the color palette is applied only here, at the
//! output boundary. Padding always happens on the raw text before any
//! escape codes are added, so a colored cell is never visibly narrower
//! than its column.

use crate::domain::DependencyUpdate;
use crate::version::VersionField;
use colored::Colorize;

/// Semantic weight of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Identical versions, or a difference in build metadata only
    Unchanged,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Prerelease channel change (volatile)
    Prerelease,
    /// Major version change (breaking)
    Major,
}

impl Severity {
    /// Classifies an update by the coarsest field its versions differ in
    pub fn of(update: &DependencyUpdate) -> Self {
        Self::from_divergence(update.current.divergence(&update.available))
    }

    /// Maps a divergence field to its severity. Metadata-only differences
    /// carry no semantic weight and classify as unchanged.
    pub fn from_divergence(divergence: Option<VersionField>) -> Self {
        match divergence {
            Some(VersionField::Major) => Severity::Major,
            Some(VersionField::Minor) => Severity::Minor,
            Some(VersionField::Patch) => Severity::Patch,
            Some(VersionField::Prerelease) => Severity::Prerelease,
            Some(VersionField::Metadata) | None => Severity::Unchanged,
        }
    }

    /// Plain display label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unchanged => "unchanged",
            Severity::Minor => "minor",
            Severity::Patch => "patch",
            Severity::Prerelease => "prerelease",
            Severity::Major => "major",
        }
    }

    /// Paints `text` in this severity's color. Prerelease gets the loudest
    /// slot: a channel flip is the change most worth a second look.
    fn paint(&self, text: &str) -> String {
        match self {
            Severity::Unchanged => text.to_string(),
            Severity::Minor => text.yellow().to_string(),
            Severity::Patch => text.green().to_string(),
            Severity::Prerelease => text.red().to_string(),
            Severity::Major => text.magenta().to_string(),
        }
    }
}

/// Renders updates as severity-colored, column-aligned cells
pub struct UpdateRenderer {
    /// Whether to emit color escape codes
    color: bool,
}

impl UpdateRenderer {
    /// Creates a renderer with colors enabled
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Creates a renderer with an explicit color choice
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// The dependency name padded to `width` and painted whole in the
    /// severity color of its update
    pub fn name(&self, update: &DependencyUpdate, width: usize) -> String {
        let padded = pad_right(&update.name, width);
        if !self.color {
            return padded;
        }
        Severity::of(update).paint(&padded)
    }

    /// The available version rendered field by field, with every field at
    /// or past the divergence point in one accent color. Fields before the
    /// divergence stay plain, so the eye lands where the change starts.
    pub fn delta(&self, update: &DependencyUpdate, width: usize) -> String {
        let divergence = update.current.divergence(&update.available);
        let reached = |field: VersionField| divergence.is_some_and(|d| field >= d);
        let available = &update.available;

        let mut segments = vec![
            (format!("v{}", available.major()), reached(VersionField::Major)),
            (format!(".{}", available.minor()), reached(VersionField::Minor)),
            (format!(".{}", available.patch()), reached(VersionField::Patch)),
        ];
        if !available.pre().is_empty() {
            segments.push((
                format!("-{}", available.pre()),
                reached(VersionField::Prerelease),
            ));
        }
        if !available.build().is_empty() {
            segments.push((
                format!("+{}", available.build()),
                reached(VersionField::Metadata),
            ));
        }

        let raw_len: usize = segments.iter().map(|(text, _)| text.len()).sum();
        let mut out = String::new();
        for (text, emphasized) in segments {
            if self.color && emphasized {
                out.push_str(&text.green().to_string());
            } else {
                out.push_str(&text);
            }
        }
        for _ in raw_len..width {
            out.push(' ');
        }
        out
    }
}

impl Default for UpdateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads `text` with trailing spaces to at least `width`; longer text is
/// never truncated
pub fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Widest raw dependency name in the batch, for column alignment
pub fn max_name_width(updates: &[DependencyUpdate]) -> usize {
    updates.iter().map(|u| u.name.len()).max().unwrap_or(0)
}

/// Widest raw version delta in the batch. The delta's plain text is the
/// canonical rendering of the available version.
pub fn max_delta_width(updates: &[DependencyUpdate]) -> usize {
    updates
        .iter()
        .map(|u| u.available.to_string().len())
        .max()
        .unwrap_or(0)
}
