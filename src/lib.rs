pub mod branch_lint;
pub mod cli;
pub mod config;
pub mod errors;
pub mod git;
pub mod jira;
pub mod prompt;
pub mod utils;
pub mod wizard;
