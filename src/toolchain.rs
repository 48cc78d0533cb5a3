//! Go toolchain integration
//!
//! This module provides:
//! - The [`DependencyManager`] capability trait the orchestrator works
//!   against (update listing, fetch, tidy)
//! - [`GoToolchain`], the default implementation shelling out to `go`
//!
//! Every operation takes the module root explicitly and scopes the child
//! process to it with `current_dir`; the process working directory is
//! never changed.

use crate::error::ToolchainError;
use std::path::Path;
use std::process::{Command, Output};

// Template printing one `path: current -> available` line per direct
// dependency with a pending update. Up-to-date, indirect, and main
// modules render as blank lines.
const LIST_TEMPLATE: &str = "{{if (and (not (or .Main .Indirect)) .Update)}}\
{{.Path}}: {{.Version}} -> {{.Update.Version}}{{end}}";

const LIST_LABEL: &str = "go list -u -m all";
const TIDY_LABEL: &str = "go mod tidy";

/// Capability surface of the underlying module toolchain
pub trait DependencyManager {
    /// Produces the raw update listing for the module at `root`
    fn list_updates(&self, root: &Path) -> Result<String, ToolchainError>;

    /// Fetches `name` at its advertised version into the module at `root`
    fn fetch(&self, root: &Path, name: &str) -> Result<(), ToolchainError>;

    /// Reconciles the manifest of the module at `root` with its sources
    fn tidy(&self, root: &Path) -> Result<(), ToolchainError>;
}

/// Default dependency manager that executes the real `go` tool
#[derive(Debug, Default)]
pub struct GoToolchain;

impl GoToolchain {
    /// Creates a new Go toolchain manager
    pub fn new() -> Self {
        Self
    }
}

impl DependencyManager for GoToolchain {
    fn list_updates(&self, root: &Path) -> Result<String, ToolchainError> {
        let output = Command::new("go")
            .args(["list", "-u", "-mod=mod", "-f", LIST_TEMPLATE, "-m", "all"])
            .current_dir(root)
            .output()
            .map_err(|source| ToolchainError::spawn(LIST_LABEL, source))?;

        if !output.status.success() {
            return Err(command_failure(LIST_LABEL, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn fetch(&self, root: &Path, name: &str) -> Result<(), ToolchainError> {
        let label = format!("go get {}", name);
        let output = Command::new("go")
            .args(["get", name])
            .current_dir(root)
            .output()
            .map_err(|source| ToolchainError::spawn(label.as_str(), source))?;

        if !output.status.success() {
            return Err(command_failure(&label, &output));
        }
        Ok(())
    }

    fn tidy(&self, root: &Path) -> Result<(), ToolchainError> {
        // Inherited stdio: tidy's own diagnostics stream straight through
        let status = Command::new("go")
            .args(["mod", "tidy"])
            .current_dir(root)
            .status()
            .map_err(|source| ToolchainError::spawn(TIDY_LABEL, source))?;

        if !status.success() {
            return Err(ToolchainError::command_failed(
                TIDY_LABEL,
                status.to_string(),
                String::new(),
            ));
        }
        Ok(())
    }
}

/// Builds the error for a command that ran but exited unsuccessfully,
/// carrying its combined stdout/stderr
fn command_failure(label: &str, output: &Output) -> ToolchainError {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut combined = stdout.trim_end().to_string();
    if !stderr.trim().is_empty() {
        if !combined.is_empty() {
            combined.push('\n');
        }
        combined.push_str(stderr.trim_end());
    }
    ToolchainError::command_failed(label, output.status.to_string(), combined)
}
