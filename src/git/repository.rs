//! Repository Operations
//!
//! Repository detection for the commit wizard.

use std::path::PathBuf;

use crate::errors::{CzJiraError, GitError, Result};

use super::run_git;

/// Finds the `.git` directory of the current repository.
///
/// This function uses `git rev-parse --git-dir`, so it works from any
/// subdirectory within a git repository.
///
/// # Errors
///
/// Returns `GitError::RepositoryNotFound` if:
/// - Not currently in a git repository
/// - The git command fails to execute
/// - The `.git` directory doesn't exist at the reported location
pub fn find_git_root() -> Result<PathBuf> {
    let git_dir = run_git(&["rev-parse", "--git-dir"])
        .map(PathBuf::from)
        .map_err(|_| CzJiraError::Git(GitError::RepositoryNotFound))?;

    if git_dir.exists() {
        Ok(git_dir)
    } else {
        Err(CzJiraError::Git(GitError::RepositoryNotFound))
    }
}
