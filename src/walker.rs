//! Module tree walker
//!
//! Locates every module root below a starting directory. A module root is
//! any directory containing a `go.mod` manifest. Nested roots are
//! independent modules, so descent continues below a root and each level
//! is reported on its own.

use crate::error::WorkspaceError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manifest file marking a directory as a module root
pub const MODULE_MANIFEST: &str = "go.mod";

/// Walks the tree below `start` and returns the directory of every module
/// manifest found. The first traversal error aborts the walk: a partial
/// root list would leave modules silently untouched.
pub fn find_module_roots(start: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut roots = Vec::new();

    // Lexical order keeps runs deterministic across filesystems
    for entry in WalkDir::new(start).sort_by_file_name() {
        let entry = entry.map_err(|source| WorkspaceError::traversal(start, source))?;
        if entry.file_type().is_file() && entry.file_name() == MODULE_MANIFEST {
            if let Some(root) = entry.path().parent() {
                roots.push(root.to_path_buf());
            }
        }
    }

    Ok(roots)
}
