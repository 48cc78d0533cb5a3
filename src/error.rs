//! Application error types using thiserror
//!
//! Error hierarchy:
//! - WorkspaceError: Module tree traversal and root validation failures
//! - DiscoveryError: Issues with the update listing and its records
//! - ToolchainError: External `go` command failures
//!
//! Workspace errors abort a run. Discovery and toolchain errors are scoped
//! to a single module root or dependency and are recorded in the run report
//! instead of propagating.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Module tree related errors
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Update discovery related errors
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// External command related errors
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// Output stream related errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors related to the module tree being processed
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The given path exists but is not a directory
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A module root could not be accessed
    #[error("cannot access {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the tree below the starting directory failed
    #[error("failed to walk {start}: {source}")]
    Traversal {
        start: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors related to discovering available updates
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The listing command itself failed
    #[error(transparent)]
    Command(#[from] ToolchainError),

    /// A listing line did not match the `name: current -> available` shape
    #[error("unrecognized update record: '{line}'")]
    MalformedRecord { line: String },

    /// A version string in a record could not be parsed
    #[error("invalid version '{value}' for {name}: {source}")]
    BadVersion {
        name: String,
        value: String,
        #[source]
        source: semver::Error,
    },
}

/// Errors related to running external commands
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// The command could not be started at all
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully
    #[error("`{program}` failed ({status})")]
    CommandFailed {
        program: String,
        status: String,
        output: String,
    },
}

impl WorkspaceError {
    /// Creates a new NotADirectory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        WorkspaceError::NotADirectory { path: path.into() }
    }

    /// Creates a new Unreadable error
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkspaceError::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Traversal error
    pub fn traversal(start: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        WorkspaceError::Traversal {
            start: start.into(),
            source,
        }
    }
}

impl DiscoveryError {
    /// Creates a new MalformedRecord error
    pub fn malformed_record(line: impl Into<String>) -> Self {
        DiscoveryError::MalformedRecord { line: line.into() }
    }

    /// Creates a new BadVersion error
    pub fn bad_version(
        name: impl Into<String>,
        value: impl Into<String>,
        source: semver::Error,
    ) -> Self {
        DiscoveryError::BadVersion {
            name: name.into(),
            value: value.into(),
            source,
        }
    }
}

impl ToolchainError {
    /// Creates a new Spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        ToolchainError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(
        program: impl Into<String>,
        status: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        ToolchainError::CommandFailed {
            program: program.into(),
            status: status.into(),
            output: output.into(),
        }
    }

    /// Combined stdout/stderr of the failed command, when captured
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolchainError::Spawn { .. } => None,
            ToolchainError::CommandFailed { output, .. } => Some(output.as_str()),
        }
    }
}
