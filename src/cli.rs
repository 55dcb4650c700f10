//! Command Line Interface
//!
//! Without a subcommand `czjira` runs the commit wizard. `lint-branch` only
//! checks the current branch name, and `completion` prints a shell
//! completion script.

use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use crate::{
    branch_lint::{BranchRule, lint_branch},
    config::{BranchConvention, Settings, load_env_files},
    errors::{CzJiraError, Result},
    git::{
        branch::{get_current_branch, list_local_branches},
        commit::{CommitExecutor, DryRunExecutor, GitCommitExecutor},
        repository::find_git_root,
        status::read_staged_changes,
    },
    jira::{JiraClient, summarize},
    prompt::TerminalPrompter,
    utils::print_success,
    wizard::{Wizard, WizardContext, WizardOutcome, scope::scope_choices},
};

#[derive(Subcommand)]
pub enum Commands {
    /// Check the current branch name against the configured convention.
    #[command(name = "lint-branch")]
    LintBranch,

    /// Print a completion script for the given shell.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
#[command(about = "Compose a conventional commit message linked to your Jira issues,\n\
then commit it and update the issues' status and work log.")]
#[command(help_template = "{about}\n\nUSAGE:\n{usage}\n\n{all-args}\n")]
#[command(name = "czjira", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the message instead of committing, and leave Jira untouched.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Sign the commit (`git commit -S`).
    #[arg(short = 'S', long, default_value_t = false)]
    pub sign: bool,

    /// Print git output and debug diagnostics.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Extra env file, loaded after `.env`, `.env.local` and `.env.jira.local`.
    #[arg(long = "env-file", value_name = "PATH")]
    pub env_files: Vec<PathBuf>,
}

/// Sends `tracing` events to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_completions(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();

    generate(shell, &mut command, name, &mut io::stdout());
}

/// Loads the env files and lists the ones found.
pub fn load_environment(cli: &Cli) -> Result<()> {
    let loaded = load_env_files(&std::env::current_dir()?, &cli.env_files);

    if !loaded.is_empty() {
        let names: Vec<String> = loaded
            .iter()
            .map(|path| {
                path.file_name()
                    .map_or_else(|| path.display().to_string(), |name| {
                        name.to_string_lossy().into_owned()
                    })
            })
            .collect();

        println!("- Environments: {}", names.join(", "));
    }

    Ok(())
}

/// # `run`
/// Runs the selected command. Only shell completion works outside a repository.
///
/// ## Errors
/// * If the branch does not follow the convention
/// * If the configuration is incomplete
/// * If the commit is declined or fails
/// * If any Jira update failed (the commit is kept)
pub async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completion { shell }) = cli.command {
        print_completions(shell);
        return Ok(());
    }

    find_git_root()?;
    load_environment(&cli)?;

    if matches!(cli.command, Some(Commands::LintBranch)) {
        return check_branch(&BranchConvention::from_env()?);
    }

    let settings = Settings::from_env()?;
    check_branch(&settings.branches)?;

    let context = gather_context(&settings)?;
    let tracker = JiraClient::new(settings.jira)?;

    let executor: Box<dyn CommitExecutor> = if cli.dry_run {
        Box::new(DryRunExecutor)
    } else {
        Box::new(GitCommitExecutor {
            sign: cli.sign,
            verbose: cli.verbose,
        })
    };

    let mut wizard = Wizard::new(TerminalPrompter::new(), &tracker);
    if cli.dry_run {
        wizard = wizard.without_tracker_updates();
    }

    match wizard.run(&context, executor.as_ref()).await? {
        WizardOutcome::Declined => Err(CzJiraError::UserCancelled),
        WizardOutcome::Committed { updates, .. } => {
            summarize(&updates)?;

            if !cli.dry_run {
                print_success("All done", "The commit was created and Jira is up to date.");
            }
            Ok(())
        }
    }
}

fn check_branch(convention: &BranchConvention) -> Result<()> {
    match BranchRule::from_convention(convention)? {
        Some(rule) => lint_branch(&get_current_branch()?, &rule),
        None => Ok(()),
    }
}

fn gather_context(settings: &Settings) -> Result<WizardContext> {
    let branch = get_current_branch()?;

    let mut names = if settings.branches.valid_names.is_empty() {
        list_local_branches()?
    } else {
        settings.branches.valid_names.clone()
    };

    if names.is_empty() {
        names.push(branch.clone());
    }

    Ok(WizardContext {
        scopes: scope_choices(&names),
        staged: read_staged_changes()?,
        branch,
    })
}
