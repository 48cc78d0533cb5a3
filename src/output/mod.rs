//! Output formatting for run reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::RunReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: true,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the full run report
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write just the summary counts
    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_new() {
        let config = OutputConfig::new(OutputFormat::Json, Verbosity::Quiet);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_verbose() {
        let config = OutputConfig::from_cli(false, true, false);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_output_config_from_cli_quiet() {
        let config = OutputConfig::from_cli(false, false, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_quiet_wins_over_verbose() {
        let config = OutputConfig::from_cli(false, true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }
}
