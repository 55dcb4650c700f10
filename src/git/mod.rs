//! Git Operations Module
//!
//! Git plumbing used by the commit wizard: repository detection, branch
//! information, the staged-file summary and the commit itself.

pub mod branch;
pub mod commit;
pub mod repository;
pub mod status;

use std::process::Command;

use crate::errors::{CzJiraError, GitError, Result};

/// Runs `git <args>` and returns its trimmed stdout.
///
/// # Errors
/// * If git cannot be spawned
/// * If git exits with a non-zero status (stderr is kept in the error)
pub fn run_git(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(GitError::IoError)?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(CzJiraError::Git(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            output: String::from_utf8_lossy(&output.stderr).to_string(),
        }))
    }
}
