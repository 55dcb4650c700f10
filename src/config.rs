//! Configuration Management Module for czjira
//!
//! This module turns the process environment into an explicit [`Settings`]
//! value that is built once in `main` and passed down to the wizard.
//!
//! # Sources
//!
//! Variables are read from the process environment after the env files
//! (`.env`, `.env.local`, `.env.jira.local`) have been loaded into it with
//! `dotenvy`. Variables already present are never overridden, so the first
//! definition wins.
//!
//! # Required variables
//!
//! - `JIRA_BASE_URL` (e.g. `https://jira.example.com/rest/api/2`)
//! - `JIRA_PROJECT`
//! - `JIRA_ISSUE_FILTERS`
//! - `JIRA_ISSUE_TRANSITION_FILTERS`
//! - `JIRA_API_USER`
//! - `JIRA_API_TOKEN`
//!
//! `BRANCH_NAME_VALIDATING_REGEXP` and `VALID_BRANCH_NAMES` are optional.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use config::Environment;
use serde::Deserialize;

use crate::errors::{ConfigError, Result};

/// Env files loaded from the working directory, in order.
pub const ENV_FILES: [&str; 3] = [".env", ".env.local", ".env.jira.local"];

pub const REQUIRED_VARIABLES: [&str; 6] = [
    "JIRA_BASE_URL",
    "JIRA_PROJECT",
    "JIRA_ISSUE_FILTERS",
    "JIRA_ISSUE_TRANSITION_FILTERS",
    "JIRA_API_USER",
    "JIRA_API_TOKEN",
];

/// Raw view of the environment; `config` lowercases the keys.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    jira_base_url: Option<String>,
    jira_project: Option<String>,
    jira_issue_filters: Option<String>,
    jira_issue_transition_filters: Option<String>,
    jira_api_user: Option<String>,
    jira_api_token: Option<String>,
    branch_name_validating_regexp: Option<String>,
    valid_branch_names: Option<String>,
}

/// Jira connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    pub base_url: String,
    pub project: String,
    pub issue_filters: Vec<String>,
    pub transition_filters: Vec<String>,
    pub user: String,
    pub token: String,
}

/// The optional branch naming convention. Readable without the Jira variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchConvention {
    pub pattern: Option<String>,
    pub valid_names: Vec<String>,
}

impl BranchConvention {
    /// # Errors
    /// * If the environment cannot be read
    pub fn from_env() -> Result<Self> {
        read_raw(None).map(|raw| Self::from_raw(&raw))
    }

    fn from_raw(raw: &RawSettings) -> Self {
        BranchConvention {
            pattern: raw
                .branch_name_validating_regexp
                .clone()
                .filter(|pattern| !pattern.trim().is_empty()),
            valid_names: raw
                .valid_branch_names
                .as_deref()
                .map(split_branch_names)
                .unwrap_or_default(),
        }
    }
}

/// Everything a single invocation needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub jira: JiraSettings,
    pub branches: BranchConvention,
}

impl Settings {
    /// Builds the settings from the process environment.
    ///
    /// # Errors
    /// * If any required variable is missing (all missing names are listed)
    /// * If the environment cannot be read
    pub fn from_env() -> Result<Self> {
        Self::from_source(None)
    }

    /// Builds the settings from an explicit variable map instead of the process environment.
    ///
    /// # Errors
    /// * If any required variable is missing
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Some(vars))
    }

    fn from_source(source: Option<HashMap<String, String>>) -> Result<Self> {
        let raw = read_raw(source)?;

        let missing: Vec<String> = REQUIRED_VARIABLES
            .iter()
            .zip([
                &raw.jira_base_url,
                &raw.jira_project,
                &raw.jira_issue_filters,
                &raw.jira_issue_transition_filters,
                &raw.jira_api_user,
                &raw.jira_api_token,
            ])
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| (*name).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables { names: missing }.into());
        }

        let branches = BranchConvention::from_raw(&raw);
        let required = |value: Option<String>| value.unwrap_or_default();

        Ok(Settings {
            jira: JiraSettings {
                base_url: required(raw.jira_base_url)
                    .trim_end_matches('/')
                    .to_string(),
                project: required(raw.jira_project),
                issue_filters: split_filter_list(&required(raw.jira_issue_filters)),
                transition_filters: split_filter_list(&required(
                    raw.jira_issue_transition_filters,
                )),
                user: required(raw.jira_api_user),
                token: required(raw.jira_api_token),
            },
            branches,
        })
    }
}

fn read_raw(source: Option<HashMap<String, String>>) -> Result<RawSettings> {
    let raw = config::Config::builder()
        .add_source(Environment::default().source(source))
        .build()
        .and_then(|config| config.try_deserialize::<RawSettings>())
        .map_err(ConfigError::from)?;

    Ok(raw)
}

/// Splits a `"[In Progress], To Do"` style list into trimmed names without brackets.
#[must_use]
pub fn split_filter_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.replace(['[', ']'], "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Splits a branch-name list on whitespace and commas.
#[must_use]
pub fn split_branch_names(value: &str) -> Vec<String> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads the default env files from `dir`, then any `extra` files.
///
/// Returns the files that were loaded. A file that fails to parse is reported
/// and skipped.
pub fn load_env_files(dir: &Path, extra: &[PathBuf]) -> Vec<PathBuf> {
    ENV_FILES
        .iter()
        .map(|name| dir.join(name))
        .chain(extra.iter().cloned())
        .filter(|path| path.exists())
        .filter_map(|path| match dotenvy::from_path(&path) {
            Ok(()) => Some(path),
            Err(e) => {
                crate::utils::print_warning(
                    &format!("Error parsing {}", path.display()),
                    &e.to_string(),
                );
                None
            }
        })
        .collect()
}
