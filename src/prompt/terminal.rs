//! Terminal prompts built on `inquire`, plus the host loop that drives the
//! bounded title input on a `console::Term`.

use console::{Term, style};
use inquire::{
    Confirm, CustomUserError, Editor, MultiSelect, Select, Text,
    list_option::ListOption,
    validator::{ErrorMessage, Validation},
};

use crate::{
    errors::{CzJiraError, Result},
    jira::{IssueChoice, TransitionChoice},
    utils::print_warning,
    wizard::{
        answers::CommitType,
        scope::ScopeChoice,
        time_spent::TimeSpent,
        validate_body, validate_title,
    },
};

use super::{BoundedInput, KeyOutcome, Prompter};

const COMMIT_TYPE_PAGE_SIZE: usize = 15;

fn as_validation(result: std::result::Result<(), String>) -> Validation {
    match result {
        Ok(()) => Validation::Valid,
        Err(message) => Validation::Invalid(ErrorMessage::Custom(message)),
    }
}

pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new() -> Self {
        TerminalPrompter {
            term: Term::stderr(),
        }
    }

    /// Draws `input`, leaving the cursor at its insertion point. Returns the number of lines drawn.
    fn draw(&self, input: &BoundedInput, error: Option<&str>) -> std::io::Result<usize> {
        let screen = input.render(error);
        let lines = screen.lines().count();

        self.term.write_str(&screen)?;

        if error.is_some() {
            self.term.move_cursor_up(1)?;
        }

        let column = 2 + input.label_length() + 1 + input.cursor_column();
        self.term.write_str("\r")?;
        self.term.move_cursor_right(column)?;

        Ok(lines)
    }

    fn erase(&self, lines: usize, error_shown: bool) -> std::io::Result<()> {
        if error_shown {
            self.term.move_cursor_down(1)?;
        }

        self.term.clear_line()?;
        self.term.clear_last_lines(lines.saturating_sub(1))
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select_commit_type(&mut self, types: &[CommitType], default: usize) -> Result<CommitType> {
        let labels: Vec<String> = types
            .iter()
            .map(|t| format!("{:<9} {}", format!("{t}:"), t.description()))
            .collect();

        let selected = Select::new("Select the type of update that you're committing:", labels)
            .with_starting_cursor(default)
            .with_page_size(COMMIT_TYPE_PAGE_SIZE)
            .raw_prompt()?;

        Ok(types[selected.index])
    }

    fn select_issues(&mut self, choices: &[IssueChoice]) -> Result<Vec<IssueChoice>> {
        let at_least_one = |selected: &[ListOption<&IssueChoice>]| -> std::result::Result<
            Validation,
            CustomUserError,
        > {
            Ok(if selected.is_empty() {
                Validation::Invalid("You must select at least one issue key".into())
            } else {
                Validation::Valid
            })
        };

        let selected = MultiSelect::new(
            "Select the Jira issue key(s) that you're committing:",
            choices.to_vec(),
        )
        .with_validator(at_least_one)
        .prompt()?;

        Ok(selected)
    }

    fn input_time_spent(&mut self, key: &str) -> Result<String> {
        let message = format!("Time taken for {key} (required):");

        let time = Text::new(&message)
            .with_help_message("{1w 2d 3h 4m}")
            .with_validator(|input: &str| -> std::result::Result<Validation, CustomUserError> {
                Ok(as_validation(
                    input
                        .parse::<TimeSpent>()
                        .map(|_| ())
                        .map_err(|e| e.to_string()),
                ))
            })
            .prompt()?;

        Ok(time)
    }

    fn select_transition(
        &mut self,
        key: &str,
        choices: &[TransitionChoice],
    ) -> Result<TransitionChoice> {
        let message = format!("Update status of {key} to:");

        let selected = Select::new(&message, choices.to_vec())
            .with_starting_cursor(0)
            .prompt()?;

        Ok(selected)
    }

    fn select_scope(&mut self, scopes: &[ScopeChoice], default: usize) -> Result<ScopeChoice> {
        let selected = Select::new("Select the scope of your changes:", scopes.to_vec())
            .with_starting_cursor(default)
            .prompt()?;

        Ok(selected)
    }

    fn confirm_breaking(&mut self) -> Result<bool> {
        Ok(Confirm::new("Are there any breaking changes?")
            .with_default(false)
            .prompt()?)
    }

    fn input_title(&mut self, mut input: BoundedInput) -> Result<String> {
        let mut error: Option<String> = None;

        loop {
            let lines = self.draw(&input, error.as_deref())?;
            let key = self.term.read_key()?;
            self.erase(lines, error.is_some())?;

            match input.handle_key(&key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Cancel => return Err(CzJiraError::UserCancelled),
                KeyOutcome::Submit => {
                    let value = input.value();

                    match validate_title(&value) {
                        Ok(()) => {
                            self.term.write_line(&format!(
                                "{} {}{}",
                                style("✔").green(),
                                style(input.label().trim_start()).dim(),
                                style(&value).cyan()
                            ))?;
                            return Ok(value);
                        }
                        Err(message) => error = Some(message),
                    }
                }
            }

            // Typing clears a stale error
            if matches!(key, console::Key::Char(_)) {
                error = None;
            }
        }
    }

    fn input_body(&mut self, breaking: bool) -> Result<String> {
        let message = if breaking {
            "Provide a longer description of the breaking changes:"
        } else {
            "Provide a longer description (leave empty to skip):"
        };

        let body = Editor::new(message)
            .with_validator(
                move |input: &str| -> std::result::Result<Validation, CustomUserError> {
                    Ok(as_validation(validate_body(input.trim(), breaking)))
                },
            )
            .prompt()?;

        Ok(body)
    }

    fn report_invalid(&mut self, message: &str) {
        print_warning("Invalid answer", message);
    }

    fn show_preview(&mut self, preview: &str) {
        println!("{preview}");
    }

    fn confirm_commit(&mut self) -> Result<bool> {
        Ok(
            Confirm::new("Are you sure you want to proceed with the commit?")
                .with_default(true)
                .prompt()?,
        )
    }
}
