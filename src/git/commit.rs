//! Commit Operations
//!
//! Executes the commit once the wizard has assembled and confirmed a message.

use std::process::{Command, Output};

use crate::errors::{CzJiraError, GitError, Result, pretty_print_error};

/// Something that can turn an assembled message into a commit.
#[cfg_attr(test, mockall::automock)]
pub trait CommitExecutor {
    /// Commits the staged changes with `message`.
    ///
    /// # Errors
    /// * If the commit could not be created
    fn commit(&self, message: &str) -> Result<()>;
}

/// Commits through the `git` binary.
#[derive(Debug, Default, Clone)]
pub struct GitCommitExecutor {
    /// Adds `-S` to sign the commit.
    pub sign: bool,
    pub verbose: bool,
}

impl CommitExecutor for GitCommitExecutor {
    fn commit(&self, message: &str) -> Result<()> {
        if self.verbose {
            println!("Committing files...");
        }

        let mut command = Command::new("git");
        command.arg("commit");

        if self.sign {
            command.arg("-S");
        }

        let output = command.arg("-m").arg(message).output()?;

        handle_output("commit", &output, self.verbose)
    }
}

/// Prints the message instead of committing.
#[derive(Debug, Default, Clone)]
pub struct DryRunExecutor;

impl CommitExecutor for DryRunExecutor {
    fn commit(&self, message: &str) -> Result<()> {
        println!("Would commit with message:");
        println!("---");
        println!("{message}");
        println!("---");

        Ok(())
    }
}

/// Handles the output of git commands, providing consistent error handling and success messaging.
///
/// # Arguments
/// * `method_name` - The name of the git command being executed (e.g., "commit")
/// * `output` - The `Output` struct containing the command's stdout, stderr, and status
/// * `verbose` - Whether to print verbose output during the operation
#[doc(hidden)]
fn handle_output(method_name: &str, output: &Output, verbose: bool) -> Result<()> {
    if output.status.success() {
        if verbose {
            println!("{method_name} successful!");
        }

        if !output.stdout.is_empty() {
            println!("{}", String::from_utf8_lossy(&output.stdout).trim());
        }

        Ok(())
    } else {
        let error_message = String::from_utf8_lossy(&output.stderr);

        eprintln!("\n🚨 Git {method_name} failed:");
        pretty_print_error(&error_message);

        Err(CzJiraError::Git(GitError::CommandFailed {
            command: format!("git {method_name}"),
            output: error_message.to_string(),
        }))
    }
}
