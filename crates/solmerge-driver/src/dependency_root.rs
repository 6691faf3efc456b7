//! Dependency root discovery
//!
//! Bare import references that do not exist under the working directory fall
//! back to the package manager's flattened dependency directory. The nearest
//! `node_modules` directory found walking up from the start directory wins.

use std::path::{Path, PathBuf};

/// Directory name of installed dependencies
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Find the dependency root by searching `start` and its ancestors
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DEPENDENCY_DIR))
        .find(|candidate| candidate.is_dir())
}
