use std::fmt::Display;

use console::{Style, style};

/// # `MessageKind`
/// Trait for the kinds of user-facing messages.
trait MessageKind {
    /// The emoji prefix for each message kind (e.g., "🚨 ERROR")
    const PREFIX: &'static str;

    /// Whether to output to stderr (true) or stdout (false)
    const TO_STDERR: bool = false;

    fn style() -> Style;
}

struct Error;
struct Warning;
struct Success;
struct Info;

impl MessageKind for Error {
    const PREFIX: &'static str = "🚨 ERROR";
    const TO_STDERR: bool = true;

    fn style() -> Style {
        Style::new().red().bold()
    }
}

impl MessageKind for Warning {
    const PREFIX: &'static str = "⚠️ WARNING";
    const TO_STDERR: bool = true;

    fn style() -> Style {
        Style::new().yellow().bold()
    }
}

impl MessageKind for Success {
    const PREFIX: &'static str = "✅ SUCCESS";

    fn style() -> Style {
        Style::new().green().bold()
    }
}

impl MessageKind for Info {
    const PREFIX: &'static str = "ℹ️ INFO";

    fn style() -> Style {
        Style::new().blue().bold()
    }
}

/// # `format_message`
/// Formats a message, with an optional suggestion appended after a blank line.
fn format_message<T: MessageKind>(title: &str, details: &str, suggestion: Option<&str>) -> String {
    let header = format!("{}: {title}", T::style().apply_to(T::PREFIX));

    let mut message = if details.is_empty() {
        header
    } else {
        format!("{header}\n\n{details}")
    };

    if let Some(suggestion) = suggestion {
        message.push_str("\n\n");
        message.push_str(suggestion);
    }

    message
}

fn emit<T: MessageKind>(message: &str) {
    if T::TO_STDERR {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

/// # `print_error`
/// Prints an error message with a consistent format for user-friendly display.
///
/// ## Arguments
/// - `title`: The title of the error message.
/// - `details`: The details of the error message.
/// - `suggestion`: The suggestion for resolving the error.
pub fn print_error(title: &str, details: &str, suggestion: &str) {
    emit::<Error>(&format_message::<Error>(title, details, Some(suggestion)));
}

/// # `print_warning`
/// Prints a warning message on stderr.
pub fn print_warning(title: &str, details: &str) {
    emit::<Warning>(&format_message::<Warning>(title, details, None));
}

/// # `print_success`
/// Prints a success message.
pub fn print_success(title: &str, details: &str) {
    emit::<Success>(&format_message::<Success>(title, details, None));
}

/// # `print_info`
/// Prints an informational message.
pub fn print_info(title: &str, details: &str) {
    emit::<Info>(&format_message::<Info>(title, details, None));
}

/// # `format_list`
/// Formats a list of items, one `  - item` per line.
pub fn format_list<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", style(item).blue()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// # `truncate_chars`
/// Cuts `text` after `max_chars` characters and appends `...` when something was cut.
///
/// Counting is done on chars, so multi-byte text is never split mid-character.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// # `title_case`
/// Turns a branch-like name into display words: `feature_auth-flow` becomes `Feature Auth Flow`.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_keeps_short_text() {
        assert_eq!(truncate_chars("short summary", 50), "short summary");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_truncate_chars_appends_ellipsis() {
        assert_eq!(truncate_chars("abcdefgh", 5), "abcde...");

        // Exactly at the limit is not truncated
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w...");
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語...");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("feature"), "Feature");
        assert_eq!(title_case("hot-fix"), "Hot Fix");
        assert_eq!(title_case("release_candidate-2"), "Release Candidate 2");
        assert_eq!(title_case(""), "");
    }
}
