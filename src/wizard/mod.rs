//! Commit Wizard
//!
//! Drives the prompt sequence and turns the answers into a commit:
//!
//! 1. commit type
//! 2. issue keys (skipped for `build`, `ci`, `revert`)
//! 3. time spent per issue (same skip rule)
//! 4. status transition per issue whose transitions could be fetched
//! 5. scope
//! 6. breaking change (same skip rule)
//! 7. title, through the bounded input
//! 8. body, unless the type skips tracking and the change is not breaking
//! 9. preview, then confirmation
//!
//! Invalid answers are reported and asked again. Once confirmed, the commit is
//! made and the Jira updates are dispatched.

pub mod answers;
pub mod message;
pub mod scope;
pub mod time_spent;

use std::collections::BTreeMap;

use futures::future::join_all;

use crate::{
    errors::Result,
    git::{commit::CommitExecutor, status::StagedChange},
    jira::{self, IssueTracker, TransitionChoice, UpdateOutcome},
    prompt::{BoundedInput, LeadingLabel, Prompter},
};

use answers::{CommitType, WizardAnswers};
use scope::{ScopeChoice, default_scope_index};
use time_spent::TimeSpent;

/// Title width, label included.
pub const MAX_TITLE_WIDTH: usize = 120;
pub const MIN_TITLE_LENGTH: usize = 5;
pub const MIN_BREAKING_BODY_LENGTH: usize = 10;

const TITLE_MESSAGE: &str = "Commit title — a short, imperative tense description (required):";

/// # Errors
/// * A user-facing message when the title is shorter than [`MIN_TITLE_LENGTH`]
pub fn validate_title(title: &str) -> std::result::Result<(), String> {
    if title.trim().chars().count() >= MIN_TITLE_LENGTH {
        Ok(())
    } else {
        Err(format!(
            "The title must have at least {MIN_TITLE_LENGTH} characters"
        ))
    }
}

/// Bodies are optional unless the change is breaking.
///
/// # Errors
/// * A user-facing message when a breaking body is shorter than [`MIN_BREAKING_BODY_LENGTH`]
pub fn validate_body(body: &str, breaking: bool) -> std::result::Result<(), String> {
    if !breaking || body.trim().chars().count() >= MIN_BREAKING_BODY_LENGTH {
        Ok(())
    } else {
        Err(format!(
            "The body must have at least {MIN_BREAKING_BODY_LENGTH} characters"
        ))
    }
}

/// Repository facts gathered before the wizard starts.
#[derive(Debug, Clone, Default)]
pub struct WizardContext {
    pub branch: String,
    pub scopes: Vec<ScopeChoice>,
    pub staged: Vec<StagedChange>,
}

#[derive(Debug)]
pub enum WizardOutcome {
    Committed {
        message: String,
        updates: Vec<UpdateOutcome>,
    },
    Declined,
}

pub struct Wizard<'a, P: Prompter> {
    prompter: P,
    tracker: &'a dyn IssueTracker,
    update_tracker: bool,
}

impl<'a, P: Prompter> Wizard<'a, P> {
    pub fn new(prompter: P, tracker: &'a dyn IssueTracker) -> Self {
        Wizard {
            prompter,
            tracker,
            update_tracker: true,
        }
    }

    /// Skips the Jira updates after the commit.
    #[must_use]
    pub fn without_tracker_updates(mut self) -> Self {
        self.update_tracker = false;
        self
    }

    /// Runs every step, previews the message and, if confirmed, commits and
    /// updates Jira.
    ///
    /// # Errors
    /// * If a prompt fails or is cancelled
    /// * If the commit fails
    pub async fn run(
        &mut self,
        context: &WizardContext,
        executor: &dyn CommitExecutor,
    ) -> Result<WizardOutcome> {
        let answers = self.collect(context).await?;
        let message = message::assemble(&answers, &context.staged);

        self.prompter
            .show_preview(&message::render_preview(&message));

        if !self.prompter.confirm_commit()? {
            return Ok(WizardOutcome::Declined);
        }

        executor.commit(&message)?;

        let updates = if self.update_tracker {
            jira::apply_updates(self.tracker, &answers.pending_updates()).await
        } else {
            Vec::new()
        };

        Ok(WizardOutcome::Committed { message, updates })
    }

    /// Asks every question and returns the answers.
    ///
    /// # Errors
    /// * If a prompt fails or is cancelled
    pub async fn collect(&mut self, context: &WizardContext) -> Result<WizardAnswers> {
        let default_type = CommitType::ALL
            .iter()
            .position(|t| *t == CommitType::DEFAULT)
            .unwrap_or(0);
        let commit_type = self
            .prompter
            .select_commit_type(&CommitType::ALL, default_type)?;

        let mut answers = WizardAnswers::new(commit_type);

        if !commit_type.skips_tracking() {
            answers.issue_keys = self.ask_issue_keys().await?;

            let transitions = self.fetch_transitions(&answers.issue_keys).await;

            answers.time_spent = self.ask_time_spent(&answers.issue_keys)?;
            answers.transitions = self.ask_transitions(&answers.issue_keys, &transitions)?;
        }

        let default_scope = default_scope_index(&context.scopes, &context.branch);
        answers.scope = self
            .prompter
            .select_scope(&context.scopes, default_scope)?
            .value;

        if !commit_type.skips_tracking() {
            answers.breaking = self.prompter.confirm_breaking()?;
        }

        answers.title = self.ask_title(&answers)?;

        if !commit_type.skips_tracking() || answers.breaking {
            answers.body = self.ask_body(answers.breaking)?;
        }

        Ok(answers)
    }

    async fn ask_issue_keys(&mut self) -> Result<Vec<String>> {
        let choices = jira::issue_choices(self.tracker).await;

        loop {
            let selected = self.prompter.select_issues(&choices)?;

            if selected.is_empty() {
                self.prompter
                    .report_invalid("You must select at least one issue key");
                continue;
            }

            let mut keys: Vec<String> = Vec::new();
            for key in selected.into_iter().filter_map(|choice| choice.key) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }

            return Ok(keys);
        }
    }

    /// Looks up every key's transitions concurrently. Keys whose lookup failed are absent.
    async fn fetch_transitions(&self, keys: &[String]) -> BTreeMap<String, Vec<TransitionChoice>> {
        let lookups = keys
            .iter()
            .map(|key| jira::transition_choices(self.tracker, key));

        keys.iter()
            .cloned()
            .zip(join_all(lookups).await)
            .filter_map(|(key, choices)| choices.map(|choices| (key, choices)))
            .collect()
    }

    fn ask_time_spent(&mut self, keys: &[String]) -> Result<BTreeMap<String, TimeSpent>> {
        let mut times = BTreeMap::new();

        for key in keys {
            let time = loop {
                let raw = self.prompter.input_time_spent(key)?;

                match raw.parse::<TimeSpent>() {
                    Ok(time) => break time,
                    Err(e) => self.prompter.report_invalid(&e.to_string()),
                }
            };

            times.insert(key.clone(), time);
        }

        Ok(times)
    }

    fn ask_transitions(
        &mut self,
        keys: &[String],
        available: &BTreeMap<String, Vec<TransitionChoice>>,
    ) -> Result<BTreeMap<String, String>> {
        let mut chosen = BTreeMap::new();

        for key in keys {
            let Some(choices) = available.get(key) else {
                continue;
            };

            if let Some(id) = self.prompter.select_transition(key, choices)?.id {
                chosen.insert(key.clone(), id);
            }
        }

        Ok(chosen)
    }

    fn ask_title(&mut self, answers: &WizardAnswers) -> Result<String> {
        let label = LeadingLabel::Derived(Box::new(WizardAnswers::title_prefix));
        let input = BoundedInput::new(TITLE_MESSAGE, Some(MAX_TITLE_WIDTH), Some(&label), answers)?;

        loop {
            let title = self.prompter.input_title(input.clone())?;
            let title = title.trim().to_string();

            match validate_title(&title) {
                Ok(()) => return Ok(title),
                Err(message) => self.prompter.report_invalid(&message),
            }
        }
    }

    fn ask_body(&mut self, breaking: bool) -> Result<String> {
        loop {
            let body = self.prompter.input_body(breaking)?;
            let body = body.trim().to_string();

            match validate_body(&body, breaking) {
                Ok(()) => return Ok(body),
                Err(message) => self.prompter.report_invalid(&message),
            }
        }
    }
}
