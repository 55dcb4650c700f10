//! Jira REST payloads and the prompt choices derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::truncate_chars;

/// Summaries longer than this are cut and suffixed with `...`.
pub const MAX_SUMMARY_LENGTH: usize = 50;

pub const NO_ISSUE_LABEL: &str = "Undefined issue! Task first, commit next!";
pub const KEEP_STATUS_LABEL: &str = "Keep issue status unchanged!";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    pub priority: Option<Named>,
    pub issuetype: Option<Named>,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: Option<Named>,
}

#[derive(Debug, Serialize)]
pub struct TransitionRequest<'a> {
    pub transition: TransitionId<'a>,
}

#[derive(Debug, Serialize)]
pub struct TransitionId<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogRequest<'a> {
    pub time_spent: &'a str,
}

/// An entry of the issue multi-select. The sentinel has no key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueChoice {
    pub key: Option<String>,
    pub priority: Option<String>,
    pub label: String,
}

impl IssueChoice {
    #[must_use]
    pub fn sentinel() -> Self {
        IssueChoice {
            key: None,
            priority: None,
            label: NO_ISSUE_LABEL.to_string(),
        }
    }
}

impl From<Issue> for IssueChoice {
    fn from(issue: Issue) -> Self {
        let issue_type = issue.fields.issuetype.map(|t| t.name).unwrap_or_default();
        let priority = issue.fields.priority.map(|p| p.name);

        let label = format!(
            "{} — {issue_type} [{}]: {}",
            issue.key,
            priority.as_deref().unwrap_or("None"),
            truncate_chars(&issue.fields.summary, MAX_SUMMARY_LENGTH)
        );

        IssueChoice {
            key: Some(issue.key),
            priority,
            label,
        }
    }
}

impl fmt::Display for IssueChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// An entry of a transition select. The sentinel keeps the status unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionChoice {
    pub id: Option<String>,
    pub label: String,
}

impl TransitionChoice {
    #[must_use]
    pub fn sentinel() -> Self {
        TransitionChoice {
            id: None,
            label: KEEP_STATUS_LABEL.to_string(),
        }
    }
}

impl From<Transition> for TransitionChoice {
    fn from(transition: Transition) -> Self {
        let target = transition.to.map_or_else(String::new, |to| to.name);

        TransitionChoice {
            label: format!("{} [{target}]", transition.name),
            id: Some(transition.id),
        }
    }
}

impl fmt::Display for TransitionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_choice_label() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "id": "10001",
            "key": "CORE-7",
            "fields": {
                "summary": "Token refresh races with logout",
                "priority": { "name": "High" },
                "issuetype": { "name": "Bug" }
            }
        }))
        .unwrap();

        let choice = IssueChoice::from(issue);

        assert_eq!(choice.key.as_deref(), Some("CORE-7"));
        assert_eq!(choice.priority.as_deref(), Some("High"));
        assert_eq!(
            choice.label,
            "CORE-7 — Bug [High]: Token refresh races with logout"
        );
    }

    #[test]
    fn test_issue_choice_truncates_long_summary() {
        let summary = "x".repeat(60);
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "key": "CORE-8",
            "fields": { "summary": summary, "priority": { "name": "Low" }, "issuetype": { "name": "Task" } }
        }))
        .unwrap();

        let choice = IssueChoice::from(issue);

        assert!(choice.label.ends_with(&format!("{}...", "x".repeat(50))));
    }

    #[test]
    fn test_transition_choice_label() {
        let transition: Transition = serde_json::from_value(serde_json::json!({
            "id": "31",
            "name": "Start Progress",
            "to": { "name": "In Progress" }
        }))
        .unwrap();

        let choice = TransitionChoice::from(transition);

        assert_eq!(choice.id.as_deref(), Some("31"));
        assert_eq!(choice.label, "Start Progress [In Progress]");
    }

    #[test]
    fn test_request_bodies() {
        let transition = serde_json::to_value(TransitionRequest {
            transition: TransitionId { id: "31" },
        })
        .unwrap();
        assert_eq!(transition, serde_json::json!({ "transition": { "id": "31" } }));

        let worklog = serde_json::to_value(WorklogRequest { time_spent: "1d 2h" }).unwrap();
        assert_eq!(worklog, serde_json::json!({ "timeSpent": "1d 2h" }));
    }
}
