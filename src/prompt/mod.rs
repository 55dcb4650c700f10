//! Prompts
//!
//! The wizard asks every question through the [`Prompter`] trait. The
//! terminal implementation lives in [`terminal`]; tests drive the wizard
//! with a mock.

pub mod bounded_input;
pub mod terminal;

use crate::{
    errors::Result,
    jira::{IssueChoice, TransitionChoice},
    wizard::{answers::CommitType, scope::ScopeChoice},
};

pub use bounded_input::{BoundedInput, KeyOutcome, LeadingLabel};
pub use terminal::TerminalPrompter;

#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn select_commit_type(&mut self, types: &[CommitType], default: usize) -> Result<CommitType>;

    /// Multi-select over the issue choices (sentinel included).
    fn select_issues(&mut self, choices: &[IssueChoice]) -> Result<Vec<IssueChoice>>;

    /// Raw time-spent text for `key`.
    fn input_time_spent(&mut self, key: &str) -> Result<String>;

    fn select_transition(
        &mut self,
        key: &str,
        choices: &[TransitionChoice],
    ) -> Result<TransitionChoice>;

    fn select_scope(&mut self, scopes: &[ScopeChoice], default: usize) -> Result<ScopeChoice>;

    fn confirm_breaking(&mut self) -> Result<bool>;

    /// Runs the bounded title input and returns its submitted value.
    fn input_title(&mut self, input: BoundedInput) -> Result<String>;

    /// Long description, written in an external editor.
    fn input_body(&mut self, breaking: bool) -> Result<String>;

    /// Tells the user why the last answer was rejected before asking again.
    fn report_invalid(&mut self, message: &str);

    fn show_preview(&mut self, preview: &str);

    fn confirm_commit(&mut self) -> Result<bool>;
}
