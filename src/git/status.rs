//! Staged Changes
//!
//! Reads the staged-file summary that ends up in the
//! `CONTENT MODIFICATIONS` section of the commit message.

use crate::errors::Result;

use super::run_git;

/// One line of `git diff --cached --name-status`, e.g. `M\tsrc/lib.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange(pub String);

/// Reads the staged changes of the index.
///
/// # Errors
/// * If the git command fails
pub fn read_staged_changes() -> Result<Vec<StagedChange>> {
    let output = run_git(&["diff", "--cached", "--name-status"])?;

    Ok(parse_name_status(&output))
}

/// Parses `--name-status` output, dropping blank lines.
#[must_use]
pub fn parse_name_status(output: &str) -> Vec<StagedChange> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| StagedChange(line.to_string()))
        .collect()
}
