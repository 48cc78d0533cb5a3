//! modtidy - Multi-module Go dependency tidy and update CLI tool
//!
//! This tool walks a directory tree for Go modules and runs `go mod tidy`
//! in each of them, optionally fetching dependency updates first.

use clap::Parser;
use modtidy::cli::CliArgs;
use modtidy::orchestrator::Orchestrator;
use modtidy::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Route diagnostics to stderr so stdout stays reserved for the report
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Print run context in verbose mode
    if args.verbose {
        eprintln!("modtidy v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        if args.update {
            eprintln!("Mode: update");
        }
    }

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(args.clone());
    let report = orchestrator.run()?;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    // Output the report
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Partial success when some roots or updates failed
    if report.has_failures() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
