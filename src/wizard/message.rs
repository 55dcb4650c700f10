//! Commit message assembly and preview.

use console::{measure_text_width, style};

use crate::git::status::StagedChange;

use super::answers::WizardAnswers;

pub const PREVIEW_TITLE: &str = "Commit Message Preview";

const PREVIEW_PADDING: usize = 1;

/// Builds the final commit message from the answers and the staged changes.
///
/// The layout is the title line, an optional `DESCRIPTION:` or
/// `BREAKING CHANGE:` section, the `CONTENT MODIFICATIONS:` section and an
/// optional `TIME:` section. The result is trimmed.
#[must_use]
pub fn assemble(answers: &WizardAnswers, staged: &[StagedChange]) -> String {
    let mut message = format!("{}{}", answers.title_prefix(), answers.title);

    if answers.body.is_empty() {
        message.push_str("\n\n\n");
    } else {
        let heading = if answers.breaking {
            "BREAKING CHANGE:"
        } else {
            "DESCRIPTION:"
        };
        message.push_str(&format!("\n\n\n{heading}\n{}\n", answers.body));
    }

    message.push_str("CONTENT MODIFICATIONS:");
    for change in staged {
        message.push_str(&format!("\n\t{}", change.0));
    }

    if !answers.time_spent.is_empty() {
        message.push_str("\nTIME:");
        for (key, time) in &answers.time_spent {
            message.push_str(&format!("\n\t{key}\t[{time}]"));
        }
    }

    message.trim().to_string()
}

/// Renders `message` inside a dashed box with a centered title.
#[must_use]
pub fn render_preview(message: &str) -> String {
    let tab_free: Vec<String> = message.lines().map(|line| line.replace('\t', "    ")).collect();

    let content_width = tab_free
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0)
        .max(measure_text_width(PREVIEW_TITLE) + 2);
    let inner_width = content_width + 2 * PREVIEW_PADDING;

    let title = format!(" {PREVIEW_TITLE} ");
    let dashes = inner_width.saturating_sub(measure_text_width(&title));
    let left = dashes / 2;
    let top = format!("{}{title}{}", "-".repeat(left), "-".repeat(dashes - left));
    let bottom = "-".repeat(inner_width);

    let indent = " ".repeat(PREVIEW_PADDING);
    let mut lines = vec![String::new(), style(top).yellow().to_string()];
    lines.extend(std::iter::repeat_n(String::new(), PREVIEW_PADDING));
    lines.extend(tab_free.iter().map(|line| format!("{indent}{line}")));
    lines.extend(std::iter::repeat_n(String::new(), PREVIEW_PADDING));
    lines.push(style(bottom).yellow().to_string());
    lines.push(String::new());

    lines.join("\n")
}
