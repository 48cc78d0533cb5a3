//! CLI argument parsing module for modtidy

use clap::Parser;
use std::path::PathBuf;

/// Multi-module Go dependency tidy and update tool
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modtidy",
    version,
    about = "Tidy every Go module under a directory tree, optionally updating dependencies first"
)]
pub struct CliArgs {
    /// Workspace directory to scan for Go modules (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Update dependencies to their latest versions before tidying
    #[arg(short, long)]
    pub update: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,
}
