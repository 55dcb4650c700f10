use clap::Parser;
use inquire::InquireError;

use czjira::{
    cli::{Cli, init_tracing, run},
    errors::{CzJiraError, GitError},
    utils::{print_error, print_info},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &CzJiraError) {
    match error {
        CzJiraError::Git(GitError::RepositoryNotFound) => print_error(
            "Git repository not found",
            "Could not find a git repository in this directory or any parent directories.",
            "Please ensure you're in a Git repository.",
        ),
        CzJiraError::Config(e) => print_error(
            "Configuration error",
            &e.to_string(),
            "Set the variables in your environment or in .env, .env.local or .env.jira.local.",
        ),
        // Reported by the linter
        CzJiraError::BranchLint { .. } => {}
        CzJiraError::UserCancelled
        | CzJiraError::Prompt(
            InquireError::OperationCanceled | InquireError::OperationInterrupted,
        ) => print_info("Commit aborted", "Nothing was committed."),
        CzJiraError::TrackerUpdatesFailed { .. } => print_error(
            "Jira update failed",
            &error.to_string(),
            "Update the issues by hand in Jira.",
        ),
        _ => print_error("czjira failed", &error.to_string(), "Run again with --verbose for details."),
    }
}
