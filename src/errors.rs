use thiserror::Error;

/// Main error type for the czjira application
#[derive(Error, Debug)]
pub enum CzJiraError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Jira error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Branch '{branch}' does not follow the naming convention")]
    BranchLint { branch: String },

    #[error("{failed} Jira update(s) failed - the commit was kept")]
    TrackerUpdatesFailed { failed: usize },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable(s): {}", names.join(", "))]
    MissingVariables { names: Vec<String> },

    #[error("Could not read environment: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid RegExp pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Bounded input requires a maximum length")]
    MissingMaxLength,

    #[error("Could not build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Git-related errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("IO error during git operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not in a git repository - please run this command from within a git repository")]
    RepositoryNotFound,

    #[error("Git command failed: {command}\nOutput: {output}")]
    CommandFailed { command: String, output: String },
}

/// Jira REST errors
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{action} for {key} returned HTTP {status}")]
    UnexpectedStatus {
        action: &'static str,
        key: String,
        status: u16,
    },

    #[error("Could not decode the response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Type alias for Result using `CzJiraError`
pub type Result<T> = std::result::Result<T, CzJiraError>;

/// Prints git's stderr output indented under a failure header.
pub fn pretty_print_error(error: &str) {
    for line in error.lines().filter(|line| !line.trim().is_empty()) {
        eprintln!("    {}", line.trim_end());
    }
}
