//! Core domain models for modtidy
//!
//! This module contains the fundamental types used throughout the application:
//! - Discovered dependency updates (name plus current/available versions)
//! - Per-dependency apply outcomes
//! - Per-root and per-run outcome records

mod outcome;
mod update;

pub use outcome::{ApplyOutcome, RootFailure, RootOutcome, RunReport};
pub use update::DependencyUpdate;
