//! Tidy orchestrator for coordinating the entire workspace run
//!
//! This module provides:
//! - Workflow coordination: walk → discover → apply → tidy, per module root
//! - Continue-on-error handling for failures scoped to a single root
//! - Abort handling for workspace-level failures (unreadable start path,
//!   broken traversal, a root vanishing mid-run)
//!
//! A root whose update listing cannot be read or parsed is left untouched:
//! its tidy phase is skipped so a half-understood manifest is never
//! rewritten. Failures in the apply or tidy phase are recorded and the run
//! moves on to the next root.

use crate::apply::apply_updates;
use crate::cli::CliArgs;
use crate::discovery::discover;
use crate::domain::{RootFailure, RootOutcome, RunReport};
use crate::error::{AppError, WorkspaceError};
use crate::format::UpdateRenderer;
use crate::progress::Progress;
use crate::toolchain::{DependencyManager, GoToolchain};
use crate::walker::find_module_roots;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, error, info};

/// Coordinates the tidy workflow across every module root in a workspace
pub struct Orchestrator<M: DependencyManager> {
    /// CLI arguments controlling the run
    args: CliArgs,
    /// Toolchain the workflow drives
    manager: M,
    /// Renderer for per-update progress rows
    renderer: UpdateRenderer,
}

impl Orchestrator<GoToolchain> {
    /// Create a new orchestrator driving the installed Go toolchain
    pub fn new(args: CliArgs) -> Self {
        Self::with_manager(args, GoToolchain::new())
    }
}

impl<M: DependencyManager> Orchestrator<M> {
    /// Create an orchestrator with a custom dependency manager (for testing)
    pub fn with_manager(args: CliArgs, manager: M) -> Self {
        Self {
            args,
            manager,
            renderer: UpdateRenderer::new(),
        }
    }

    /// Run the workflow over every module root under the configured path.
    ///
    /// Returns the run report on success; an error here means the workspace
    /// itself could not be processed and nothing further was attempted.
    pub fn run(&self) -> Result<RunReport, AppError> {
        // JSON consumers read stdout; keep it clean for them.
        let chatty = !self.args.quiet && !self.args.json;
        let mut out: Box<dyn Write> = if chatty {
            Box::new(io::stdout())
        } else {
            Box::new(io::sink())
        };
        self.run_with_output(chatty, &mut *out)
    }

    /// Run the workflow with progress lines going to `out`; `show_progress`
    /// controls the scan spinner.
    pub fn run_with_output(
        &self,
        show_progress: bool,
        out: &mut dyn Write,
    ) -> Result<RunReport, AppError> {
        let start = self.args.path.as_path();
        validate_root(start)?;

        writeln!(out, "Workspace root: {}", start.display().to_string().bold())?;

        let mut progress = Progress::new(show_progress);
        progress.spinner("Scanning for module roots...");
        let walked = find_module_roots(start);
        progress.finish_and_clear();
        let roots = walked?;

        let mut report = RunReport::new(self.args.update);
        if roots.is_empty() {
            info!(path = %start.display(), "no module manifests found");
            writeln!(out, "No Go modules found under {}", start.display())?;
            return Ok(report);
        }
        debug!(count = roots.len(), "module roots discovered");

        for root in &roots {
            validate_root(root)?;
            writeln!(out, "Entering {}", root.display().to_string().cyan())?;
            let outcome = self.process_root(root, &mut *out)?;
            report.add_root(outcome);
        }

        Ok(report)
    }

    /// Run the discover/apply/tidy phases for a single module root
    fn process_root(&self, root: &Path, out: &mut dyn Write) -> Result<RootOutcome, AppError> {
        let mut outcome = RootOutcome::new(root);

        if self.args.update {
            match discover(&self.manager, root) {
                Ok(updates) => {
                    if updates.is_empty() {
                        debug!(root = %root.display(), "no updates available");
                    } else {
                        writeln!(out, "Found {} update(s)", updates.len())?;
                        let applied =
                            apply_updates(&self.manager, root, &updates, &self.renderer, out)?;
                        outcome = outcome.with_updates(applied);
                    }
                }
                Err(err) => {
                    error!(root = %root.display(), error = %err, "update discovery failed");
                    // The module state is suspect; leave its manifest untouched.
                    return Ok(outcome.with_failure(RootFailure::Discovery(err.to_string())));
                }
            }
        }

        if let Err(err) = self.manager.tidy(root) {
            error!(root = %root.display(), error = %err, "tidy failed");
            outcome = outcome.with_failure(RootFailure::Tidy(err.to_string()));
        }

        Ok(outcome)
    }
}

/// Check that a path exists and is a directory before handing it to the toolchain
fn validate_root(path: &Path) -> Result<(), WorkspaceError> {
    let metadata =
        std::fs::metadata(path).map_err(|source| WorkspaceError::unreadable(path, source))?;
    if !metadata.is_dir() {
        return Err(WorkspaceError::not_a_directory(path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolchainError;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use tempfile::TempDir;

    /// Manager whose listings are keyed by the module root's directory name
    struct ScriptedManager {
        listings: HashMap<String, String>,
        fail_listing: HashSet<String>,
        fail_fetch: HashSet<String>,
        fail_tidy: HashSet<String>,
        listed: RefCell<Vec<String>>,
        fetched: RefCell<Vec<String>>,
        tidied: RefCell<Vec<String>>,
    }

    impl ScriptedManager {
        fn new() -> Self {
            Self {
                listings: HashMap::new(),
                fail_listing: HashSet::new(),
                fail_fetch: HashSet::new(),
                fail_tidy: HashSet::new(),
                listed: RefCell::new(Vec::new()),
                fetched: RefCell::new(Vec::new()),
                tidied: RefCell::new(Vec::new()),
            }
        }

        fn with_listing(mut self, root_name: &str, listing: &str) -> Self {
            self.listings
                .insert(root_name.to_string(), listing.to_string());
            self
        }

        fn failing_listing(mut self, root_name: &str) -> Self {
            self.fail_listing.insert(root_name.to_string());
            self
        }

        fn failing_fetch(mut self, dependency: &str) -> Self {
            self.fail_fetch.insert(dependency.to_string());
            self
        }

        fn failing_tidy(mut self, root_name: &str) -> Self {
            self.fail_tidy.insert(root_name.to_string());
            self
        }
    }

    fn root_name(root: &Path) -> String {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl DependencyManager for ScriptedManager {
        fn list_updates(&self, root: &Path) -> Result<String, ToolchainError> {
            let name = root_name(root);
            self.listed.borrow_mut().push(name.clone());
            if self.fail_listing.contains(&name) {
                return Err(ToolchainError::command_failed(
                    "go list -u -m all",
                    "exit status: 1",
                    "go: module lookup disabled",
                ));
            }
            Ok(self.listings.get(&name).cloned().unwrap_or_default())
        }

        fn fetch(&self, _root: &Path, name: &str) -> Result<(), ToolchainError> {
            self.fetched.borrow_mut().push(name.to_string());
            if self.fail_fetch.contains(name) {
                return Err(ToolchainError::command_failed(
                    format!("go get {name}"),
                    "exit status: 1",
                    "go: no matching versions",
                ));
            }
            Ok(())
        }

        fn tidy(&self, root: &Path) -> Result<(), ToolchainError> {
            let name = root_name(root);
            self.tidied.borrow_mut().push(name.clone());
            if self.fail_tidy.contains(&name) {
                return Err(ToolchainError::command_failed(
                    "go mod tidy",
                    "exit status: 1",
                    "go: inconsistent vendoring",
                ));
            }
            Ok(())
        }
    }

    /// Lay out a workspace with a go.mod in each named subdirectory
    fn workspace(modules: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for module in modules {
            let root = dir.path().join(module);
            fs::create_dir_all(&root).unwrap();
            fs::write(root.join("go.mod"), "module example.com/m\n").unwrap();
        }
        dir
    }

    fn make_args(argv: &[&str]) -> CliArgs {
        use clap::Parser;
        CliArgs::parse_from(argv)
    }

    fn run_quiet<M: DependencyManager>(args: CliArgs, manager: M) -> Result<RunReport, AppError> {
        Orchestrator::with_manager(args, manager).run_with_output(false, &mut io::sink())
    }

    #[test]
    fn test_tidy_only_run_visits_every_root() {
        let dir = workspace(&["alpha", "beta"]);
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-q"]);

        let report = run_quiet(args, manager).unwrap();

        assert_eq!(report.roots_processed(), 2);
        assert!(!report.update_mode);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_tidy_only_run_never_lists_updates() {
        let dir = workspace(&["alpha"]);
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert!(orchestrator.manager.listed.borrow().is_empty());
        assert_eq!(*orchestrator.manager.tidied.borrow(), vec!["alpha"]);
    }

    #[test]
    fn test_update_run_applies_then_tidies() {
        let dir = workspace(&["svc"]);
        let manager = ScriptedManager::new()
            .with_listing("svc", "example.com/foo: v1.0.0 -> v1.1.0\n");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-u", "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let report = orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert!(report.update_mode);
        assert_eq!(report.updates_applied(), 1);
        assert_eq!(*orchestrator.manager.fetched.borrow(), vec!["example.com/foo"]);
        assert_eq!(*orchestrator.manager.tidied.borrow(), vec!["svc"]);
    }

    #[test]
    fn test_update_run_stays_quiet_for_clean_roots() {
        let dir = workspace(&["fresh", "stale"]);
        let manager = ScriptedManager::new()
            .with_listing("stale", "example.com/foo: v1.0.0 -> v1.1.0\n");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-u"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let mut out = Vec::new();
        orchestrator.run_with_output(false, &mut out).unwrap();

        // Both roots get their banner, only the one with updates reports a count
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(rendered.matches("Entering ").count(), 2);
        assert!(!rendered.contains("Found 0 update(s)"));
        assert_eq!(rendered.matches("Found ").count(), 1);
        assert!(rendered.contains("Found 1 update(s)"));
        assert!(rendered.contains("Updating "));
    }

    #[test]
    fn test_discovery_failure_skips_tidy_for_that_root_only() {
        let dir = workspace(&["alpha", "beta", "gamma"]);
        let manager = ScriptedManager::new().failing_listing("beta");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-u", "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let report = orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert_eq!(report.roots_processed(), 3);
        assert!(report.has_failures());
        assert_eq!(report.failed_roots().count(), 1);
        assert_eq!(*orchestrator.manager.tidied.borrow(), vec!["alpha", "gamma"]);

        let failed = report.failed_roots().next().unwrap();
        assert!(matches!(failed.failure, Some(RootFailure::Discovery(_))));
    }

    #[test]
    fn test_malformed_listing_counts_as_discovery_failure() {
        let dir = workspace(&["svc"]);
        let manager = ScriptedManager::new().with_listing("svc", "not an update record\n");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-u", "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let report = orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert!(report.has_failures());
        assert!(orchestrator.manager.tidied.borrow().is_empty());
        assert!(orchestrator.manager.fetched.borrow().is_empty());
    }

    #[test]
    fn test_apply_failure_still_tidies_and_is_reported() {
        let dir = workspace(&["svc"]);
        let manager = ScriptedManager::new()
            .with_listing(
                "svc",
                "example.com/foo: v1.0.0 -> v1.1.0\nexample.com/bar: v2.0.0 -> v3.0.0\n",
            )
            .failing_fetch("example.com/bar");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-u", "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let report = orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert_eq!(report.updates_applied(), 1);
        assert_eq!(report.apply_failures(), 1);
        assert!(report.has_failures());
        // A partial apply still benefits from a tidy pass.
        assert_eq!(*orchestrator.manager.tidied.borrow(), vec!["svc"]);
    }

    #[test]
    fn test_tidy_failure_recorded_and_run_continues() {
        let dir = workspace(&["alpha", "beta"]);
        let manager = ScriptedManager::new().failing_tidy("alpha");
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        let report = orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert_eq!(report.roots_processed(), 2);
        assert_eq!(report.failed_roots().count(), 1);
        assert_eq!(*orchestrator.manager.tidied.borrow(), vec!["alpha", "beta"]);

        let failed = report.failed_roots().next().unwrap();
        assert!(matches!(failed.failure, Some(RootFailure::Tidy(_))));
    }

    #[test]
    fn test_empty_workspace_produces_empty_report() {
        let dir = TempDir::new().unwrap();
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-q"]);

        let report = run_quiet(args, manager).unwrap();

        assert_eq!(report.roots_processed(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_missing_start_path_aborts() {
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", "/definitely/not/here", "-q"]);

        let result = run_quiet(args, manager);

        assert!(matches!(
            result,
            Err(AppError::Workspace(WorkspaceError::Unreadable { .. }))
        ));
    }

    #[test]
    fn test_start_path_that_is_a_file_aborts() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "not a workspace").unwrap();
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", file.to_str().unwrap(), "-q"]);

        let result = run_quiet(args, manager);

        assert!(matches!(
            result,
            Err(AppError::Workspace(WorkspaceError::NotADirectory { .. }))
        ));
    }

    #[test]
    fn test_roots_visited_in_lexical_order() {
        let dir = workspace(&["zebra", "alpha", "mango"]);
        let manager = ScriptedManager::new();
        let args = make_args(&["modtidy", dir.path().to_str().unwrap(), "-q"]);

        let orchestrator = Orchestrator::with_manager(args, manager);
        orchestrator.run_with_output(false, &mut io::sink()).unwrap();

        assert_eq!(
            *orchestrator.manager.tidied.borrow(),
            vec!["alpha", "mango", "zebra"]
        );
    }
}
