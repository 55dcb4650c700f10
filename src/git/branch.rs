//! Branch Operations
//!
//! Current branch lookup and local branch listing. Both feed the branch
//! linter and the scope prompt.

use crate::errors::Result;

use super::run_git;

/// Gets the current branch name.
///
/// Works before the first commit. A detached HEAD yields an empty name.
///
/// # Errors
///
/// Returns an error if:
/// - Not currently in a git repository
/// - The git command fails to execute
///
/// # Examples
///
/// ```no_run
/// use czjira::git::branch::get_current_branch;
///
/// let branch = get_current_branch()?;
/// println!("Current branch: {}", branch);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn get_current_branch() -> Result<String> {
    run_git(&["branch", "--show-current"])
}

/// Lists the short names of all local branches.
///
/// # Errors
/// * If the git command fails
pub fn list_local_branches() -> Result<Vec<String>> {
    let output = run_git(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;

    Ok(parse_branch_list(&output))
}

fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
