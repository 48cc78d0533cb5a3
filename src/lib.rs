//! modtidy - Multi-module Go dependency maintenance library
//!
//! This library provides the core functionality for keeping every Go module
//! under a directory tree tidy:
//! - Walking a workspace for module manifests (go.mod)
//! - Discovering available dependency updates through the Go toolchain
//! - Classifying and rendering version deltas
//! - Applying updates and running `go mod tidy` per module root

pub mod apply;
pub mod cli;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod toolchain;
pub mod version;
pub mod walker;
