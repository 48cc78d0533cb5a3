//! Progress display for the module scan
//!
//! Provides a spinner while the tree walk runs, using indicatif. Per-root
//! work prints plain lines instead, so the only indeterminate phase is the
//! scan itself.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the scan phase
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Show a spinner with a message for an indeterminate operation
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}
