//! Wizard answers
//!
//! The typed record the wizard fills in step by step.

use std::{collections::BTreeMap, fmt};

use super::time_spent::TimeSpent;

/// Conventional commit types offered by the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Chore,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Revert,
}

impl CommitType {
    pub const ALL: [CommitType; 11] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Chore,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Build,
        CommitType::Ci,
        CommitType::Revert,
    ];

    pub const DEFAULT: CommitType = CommitType::Chore;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Chore => "chore",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Revert => "revert",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Chore => "Continuation of an incomplete feature/other changes",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => "CSS style changes",
            CommitType::Refactor => "A code update that neither fixes a bug nor adds a feature",
            CommitType::Perf => "A code update that improves performance",
            CommitType::Test => "Adding test script",
            CommitType::Build => "Changes that affect the build system or external dependencies",
            CommitType::Ci => "Changes that affect the continuous integration system",
            CommitType::Revert => "Reverts a previous commit",
        }
    }

    /// `build`, `ci` and `revert` skip the issue, time, transition and breaking steps.
    #[must_use]
    pub const fn skips_tracking(self) -> bool {
        matches!(self, CommitType::Build | CommitType::Ci | CommitType::Revert)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user answered. Maps are keyed by issue key and ordered so
/// the `TIME:` section is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardAnswers {
    pub commit_type: CommitType,
    pub issue_keys: Vec<String>,
    pub time_spent: BTreeMap<String, TimeSpent>,
    pub transitions: BTreeMap<String, String>,
    pub scope: String,
    pub breaking: bool,
    pub title: String,
    pub body: String,
}

impl WizardAnswers {
    #[must_use]
    pub fn new(commit_type: CommitType) -> Self {
        WizardAnswers {
            commit_type,
            issue_keys: Vec::new(),
            time_spent: BTreeMap::new(),
            transitions: BTreeMap::new(),
            scope: String::new(),
            breaking: false,
            title: String::new(),
            body: String::new(),
        }
    }

    /// The `type(scope)[!]: ` prefix of the title line.
    #[must_use]
    pub fn title_prefix(&self) -> String {
        format!(
            "{}({}){}: ",
            self.commit_type,
            self.scope,
            if self.breaking { "!" } else { "" }
        )
    }

    /// Issue keys that received both a transition and a time entry, with the
    /// values needed to update them.
    #[must_use]
    pub fn pending_updates(&self) -> Vec<IssueUpdate> {
        self.issue_keys
            .iter()
            .filter_map(|key| {
                let transition_id = self.transitions.get(key)?;
                let time_spent = self.time_spent.get(key)?;

                Some(IssueUpdate {
                    key: key.clone(),
                    transition_id: transition_id.clone(),
                    time_spent: time_spent.to_string(),
                })
            })
            .collect()
    }
}

/// The status and work-log update for one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUpdate {
    pub key: String,
    pub transition_id: String,
    pub time_spent: String,
}
