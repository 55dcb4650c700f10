//! Bounded Text Input
//!
//! A single-line input with a hard character budget. The control itself is a
//! plain state machine: a host loop feeds it keys through
//! [`BoundedInput::handle_key`] and draws whatever [`BoundedInput::render`]
//! returns. Lengths are display columns. The budget is the maximum length
//! minus the width of the leading label, so a `fix(auth): ` label eats into
//! the title's allowance and a wide character costs two columns.

use console::{Key, measure_text_width};

use crate::{
    errors::{ConfigError, Result},
    wizard::answers::WizardAnswers,
};

/// The text shown in front of the buffer.
pub enum LeadingLabel {
    Static(String),
    /// Computed from the answers collected so far.
    Derived(Box<dyn Fn(&WizardAnswers) -> String + Send>),
}

impl LeadingLabel {
    fn resolve(&self, answers: &WizardAnswers) -> String {
        match self {
            LeadingLabel::Static(text) => text.clone(),
            LeadingLabel::Derived(derive) => derive(answers),
        }
    }
}

/// What the host loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct BoundedInput {
    message: String,
    max_length: usize,
    /// Resolved label with its leading space, empty when there is none.
    label: String,
    buffer: Vec<char>,
    cursor: usize,
}

impl BoundedInput {
    /// # Errors
    /// * `ConfigError::MissingMaxLength` when `max_length` is unset or zero
    pub fn new(
        message: impl Into<String>,
        max_length: Option<usize>,
        label: Option<&LeadingLabel>,
        answers: &WizardAnswers,
    ) -> Result<Self> {
        let max_length = max_length
            .filter(|length| *length > 0)
            .ok_or(ConfigError::MissingMaxLength)?;

        let label = label
            .map(|label| format!(" {}", label.resolve(answers)))
            .unwrap_or_default();

        Ok(BoundedInput {
            message: message.into(),
            max_length,
            label,
            buffer: Vec::new(),
            cursor: 0,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn label_length(&self) -> usize {
        measure_text_width(&self.label)
    }

    /// How many columns the buffer may take.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.max_length.saturating_sub(self.label_length())
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.budget().saturating_sub(self.buffer_width())
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Columns between the start of the buffer and the cursor.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        measure_text_width(&self.buffer[..self.cursor].iter().collect::<String>())
    }

    fn buffer_width(&self) -> usize {
        measure_text_width(&self.buffer())
    }

    /// The raw, untrimmed buffer.
    #[must_use]
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    /// `N chars left`, or `N char left` for one or zero.
    #[must_use]
    pub fn chars_left_text(&self) -> String {
        let remaining = self.remaining();

        if remaining > 1 {
            format!("{remaining} chars left")
        } else {
            format!("{remaining} char left")
        }
    }

    /// Applies one key press.
    pub fn handle_key(&mut self, key: &Key) -> KeyOutcome {
        match key {
            Key::Enter => return KeyOutcome::Submit,
            Key::Escape => return KeyOutcome::Cancel,
            Key::Char(c) if !c.is_control() => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += 1;
                self.enforce_budget();
            }
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.buffer.remove(self.cursor);
            }
            Key::Del if self.cursor < self.buffer.len() => {
                self.buffer.remove(self.cursor);
            }
            Key::ArrowLeft => self.cursor = self.cursor.saturating_sub(1),
            Key::ArrowRight => self.cursor = (self.cursor + 1).min(self.buffer.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.buffer.len(),
            _ => {}
        }

        KeyOutcome::Continue
    }

    #[cfg(test)]
    fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.handle_key(&Key::Char(c));
        }
    }

    fn enforce_budget(&mut self) {
        let budget = self.budget();

        while self.buffer_width() > budget {
            self.buffer.pop();
        }
        self.cursor = self.cursor.min(self.buffer.len());
    }

    /// The prompt, the ruler with the counter, and the labelled buffer.
    #[must_use]
    pub fn render(&self, error: Option<&str>) -> String {
        let mut screen = format!(
            "{}\n  [{}] {}\n  {} {}",
            self.message,
            "-".repeat(self.max_length),
            self.chars_left_text(),
            self.label,
            self.buffer(),
        );

        if let Some(error) = error {
            screen.push_str(&format!("\n>> {error}"));
        }

        screen
    }

    /// The submitted value: the buffer without surrounding whitespace.
    #[must_use]
    pub fn value(&self) -> String {
        self.buffer().trim().to_string()
    }
}

impl std::fmt::Debug for LeadingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadingLabel::Static(text) => f.debug_tuple("Static").field(text).finish(),
            LeadingLabel::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::CzJiraError, wizard::answers::CommitType};

    fn answers() -> WizardAnswers {
        let mut answers = WizardAnswers::new(CommitType::Fix);
        answers.scope = "auth".to_string();
        answers
    }

    fn input(max_length: usize, label: Option<&LeadingLabel>) -> BoundedInput {
        BoundedInput::new("Commit title:", Some(max_length), label, &answers()).unwrap()
    }

    #[test]
    fn test_missing_max_length_is_a_config_error() {
        assert!(matches!(
            BoundedInput::new("title", None, None, &answers()),
            Err(CzJiraError::Config(ConfigError::MissingMaxLength))
        ));
        assert!(BoundedInput::new("title", Some(0), None, &answers()).is_err());
    }

    #[test]
    fn test_label_reduces_budget() {
        let label = LeadingLabel::Static("fix(auth): ".to_string());
        let input = input(120, Some(&label));

        // The leading space counts towards the label
        assert_eq!(input.label(), " fix(auth): ");
        assert_eq!(input.label_length(), 12);
        assert_eq!(input.budget(), 108);
    }

    #[test]
    fn test_derived_label_reads_answers() {
        let label = LeadingLabel::Derived(Box::new(WizardAnswers::title_prefix));
        let input = input(120, Some(&label));

        assert_eq!(input.label(), " fix(auth): ");
    }

    #[test]
    fn test_truncates_to_budget() {
        let label = LeadingLabel::Static("feat(ui): ".to_string());
        let mut input = input(20, Some(&label));

        input.type_str("a title that is much too long");

        assert_eq!(input.budget(), 9);
        assert_eq!(input.buffer(), "a title t");
        assert_eq!(input.buffer().chars().count(), 20 - input.label_length());
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.chars_left_text(), "0 char left");
        assert_eq!(input.cursor(), 9);
    }

    #[test]
    fn test_insertion_in_the_middle_drops_the_tail() {
        let mut input = input(5, None);

        input.type_str("abcde");
        input.handle_key(&Key::Home);
        input.handle_key(&Key::Char('X'));

        assert_eq!(input.buffer(), "Xabcd");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_wide_characters_use_two_columns() {
        let mut input = input(5, None);

        input.type_str("漢字漢");

        // The third character would need columns 5 and 6
        assert_eq!(input.buffer(), "漢字");
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.cursor(), 2);
        assert_eq!(input.cursor_column(), 4);

        input.handle_key(&Key::ArrowLeft);
        assert_eq!(input.cursor_column(), 2);

        input.handle_key(&Key::End);
        input.handle_key(&Key::Char('a'));
        assert_eq!(input.buffer(), "漢字a");
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_counter_plural() {
        let mut input = input(4, None);
        assert_eq!(input.chars_left_text(), "4 chars left");

        input.type_str("abc");
        assert_eq!(input.chars_left_text(), "1 char left");
    }

    #[test]
    fn test_editing_keys() {
        let mut input = input(50, None);
        input.type_str("helo");

        input.handle_key(&Key::ArrowLeft);
        input.handle_key(&Key::Char('l'));
        assert_eq!(input.buffer(), "hello");

        input.handle_key(&Key::End);
        input.handle_key(&Key::Backspace);
        assert_eq!(input.buffer(), "hell");

        input.handle_key(&Key::Home);
        input.handle_key(&Key::Del);
        assert_eq!(input.buffer(), "ell");

        // Nothing to delete before the start
        input.handle_key(&Key::Backspace);
        assert_eq!(input.buffer(), "ell");
    }

    #[test]
    fn test_submit_and_cancel() {
        let mut input = input(50, None);

        assert_eq!(input.handle_key(&Key::Char('a')), KeyOutcome::Continue);
        assert_eq!(input.handle_key(&Key::Enter), KeyOutcome::Submit);
        assert_eq!(input.handle_key(&Key::Escape), KeyOutcome::Cancel);
    }

    #[test]
    fn test_value_is_trimmed() {
        let mut input = input(50, None);
        input.type_str("  add login   ");

        assert_eq!(input.value(), "add login");
    }

    #[test]
    fn test_render() {
        let label = LeadingLabel::Static("ci(build): ".to_string());
        let mut input = input(16, Some(&label));
        input.type_str("bump");

        let screen = input.render(Some("The title must have at least 5 characters"));

        assert_eq!(
            screen,
            "Commit title:\n  [----------------] 0 char left\n   ci(build):  bump\n>> The title must have at least 5 characters"
        );
    }
}
