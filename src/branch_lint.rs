//! Branch Name Linter
//!
//! Checks the current branch against either a custom pattern
//! (`BRANCH_NAME_VALIDATING_REGEXP`) or a pattern generated from the allowed
//! base names (`VALID_BRANCH_NAMES`). A branch passes the generated pattern
//! when it equals an allowed name or starts with `name-` followed by
//! lowercase letters, digits and dashes.

use console::style;
use regex::Regex;

use crate::{
    config::BranchConvention,
    errors::{ConfigError, CzJiraError, Result},
    utils::format_list,
};

/// The rule a branch name is checked against.
#[derive(Debug, Clone)]
pub enum BranchRule {
    /// A user-supplied pattern.
    Custom(Regex),
    /// Generated from the allowed base names.
    Allowed { names: Vec<String>, pattern: Regex },
}

impl BranchRule {
    /// Builds the rule from the convention, or `None` when neither variable is set.
    ///
    /// # Errors
    /// * If the custom pattern does not compile
    pub fn from_convention(convention: &BranchConvention) -> Result<Option<Self>> {
        if let Some(pattern) = &convention.pattern {
            return Self::custom(pattern).map(Some);
        }

        if convention.valid_names.is_empty() {
            return Ok(None);
        }

        Self::allowed(&convention.valid_names).map(Some)
    }

    /// # Errors
    /// * If `pattern` is not a valid regular expression
    pub fn custom(pattern: &str) -> Result<Self> {
        Regex::new(pattern).map(BranchRule::Custom).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
            .into()
        })
    }

    /// # Errors
    /// * If the generated pattern does not compile
    pub fn allowed(names: &[String]) -> Result<Self> {
        let alternatives = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!("^(?:{alternatives})(?:-[a-z0-9-]*)?$");

        let regex = Regex::new(&pattern)
            .map_err(|source| ConfigError::InvalidPattern { pattern, source })?;

        Ok(BranchRule::Allowed {
            names: names.to_vec(),
            pattern: regex,
        })
    }

    #[must_use]
    pub fn matches(&self, branch: &str) -> bool {
        match self {
            BranchRule::Custom(regex) | BranchRule::Allowed { pattern: regex, .. } => {
                regex.is_match(branch)
            }
        }
    }
}

/// Builds the guidance printed when `branch` fails `rule`.
#[must_use]
pub fn guidance(rule: &BranchRule) -> String {
    match rule {
        BranchRule::Allowed { names, .. } => {
            let prefixes: Vec<String> = names
                .iter()
                .map(|name| {
                    if name == "main" {
                        format!("{name}-* {}", style("(highly discouraged)").yellow())
                    } else {
                        format!("{name}-*")
                    }
                })
                .collect();

            format!(
                "Branch names must be one of:\n{}\nor one of the following prefixes:\n{}\n\n{} Branch names must be lowercase and can only contain letters, numbers, and dashes.",
                format_list(names),
                format_list(&prefixes),
                style("NB:").yellow(),
            )
        }
        BranchRule::Custom(regex) => format!(
            "Branch names must match the following RegExp pattern:\n\t{}",
            style(regex.as_str()).bold()
        ),
    }
}

fn suggestion(rule: &BranchRule) -> &'static str {
    match rule {
        BranchRule::Allowed { .. } => {
            "If you have any changes in the current working tree, stash them, create a new branch following the convention and apply the stash. Don't forget to delete this local branch."
        }
        BranchRule::Custom(_) => {
            "Rename the branch adhering the convention or stash the changes in the current working tree, create a new branch following the convention and apply the stash. Don't forget to delete this local branch."
        }
    }
}

/// Checks `branch` against `rule`, printing the outcome.
///
/// # Errors
/// * `CzJiraError::BranchLint` when the branch does not match
pub fn lint_branch(branch: &str, rule: &BranchRule) -> Result<()> {
    if rule.matches(branch) {
        println!(
            "{}",
            style("Branch name adheres to the convention. Proceeding...\n").green()
        );
        return Ok(());
    }

    tracing::debug!(branch, "branch name rejected");

    crate::utils::print_error(
        &format!("Invalid branch name '{branch}'"),
        &guidance(rule),
        suggestion(rule),
    );

    Err(CzJiraError::BranchLint {
        branch: branch.to_string(),
    })
}
