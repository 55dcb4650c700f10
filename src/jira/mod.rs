//! Jira integration
//!
//! The wizard only talks to Jira through the [`IssueTracker`] trait. Reads
//! degrade gracefully: a failed issue search leaves only the "no issue"
//! choice, and a failed transition lookup skips that issue's status prompt.
//! Writes are dispatched per issue as independent tasks whose outcomes are
//! reported as they complete.

pub mod client;
pub mod models;

use async_trait::async_trait;
use console::style;
use futures::{StreamExt, stream::FuturesUnordered};

use crate::{
    errors::{CzJiraError, Result},
    utils::print_warning,
    wizard::answers::IssueUpdate,
};

pub use client::JiraClient;
pub use models::{IssueChoice, TransitionChoice};

#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Open issues assigned to the current user, most recently updated first.
    async fn assigned_issues(&self) -> Result<Vec<IssueChoice>>;

    /// Allowed transitions of `key`, restricted to the configured names.
    async fn transitions(&self, key: &str) -> Result<Vec<TransitionChoice>>;

    /// Moves `key` through `transition_id`.
    async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()>;

    /// Adds a work-log entry of `time_spent` to `key`.
    async fn log_work(&self, key: &str, time_spent: &str) -> Result<()>;
}

/// Issue choices with the sentinel first. Never fails: on error the sentinel is all that is left.
pub async fn issue_choices(tracker: &dyn IssueTracker) -> Vec<IssueChoice> {
    let mut choices = vec![IssueChoice::sentinel()];

    match tracker.assigned_issues().await {
        Ok(issues) => choices.extend(issues),
        Err(e) => {
            tracing::warn!(error = %e, "issue search failed");
            print_warning("Error fetching Jira issues", &e.to_string());
        }
    }

    choices
}

/// Transition choices for `key` with the sentinel first, or `None` when the lookup failed.
pub async fn transition_choices(
    tracker: &dyn IssueTracker,
    key: &str,
) -> Option<Vec<TransitionChoice>> {
    match tracker.transitions(key).await {
        Ok(transitions) => {
            let mut choices = vec![TransitionChoice::sentinel()];
            choices.extend(transitions);
            Some(choices)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "transition lookup failed");
            print_warning(
                &format!("Error fetching Jira issue transitions for {key}"),
                &e.to_string(),
            );
            None
        }
    }
}

/// What happened to one issue's update.
#[derive(Debug)]
pub struct UpdateOutcome {
    pub key: String,
    pub status: Result<()>,
    pub worklog: Result<()>,
}

impl UpdateOutcome {
    #[must_use]
    pub fn failures(&self) -> usize {
        usize::from(self.status.is_err()) + usize::from(self.worklog.is_err())
    }
}

/// Runs the status and work-log update of one issue. Both calls are in
/// flight at the same time and neither undoes the other.
pub async fn apply_update(tracker: &dyn IssueTracker, update: &IssueUpdate) -> UpdateOutcome {
    tracing::debug!(key = %update.key, "dispatching jira update");

    let (status, worklog) = futures::join!(
        tracker.transition_issue(&update.key, &update.transition_id),
        tracker.log_work(&update.key, &update.time_spent),
    );

    UpdateOutcome {
        key: update.key.clone(),
        status,
        worklog,
    }
}

/// Applies every update as an independent task, reporting each issue as soon
/// as it finishes. Returns the outcomes in completion order.
pub async fn apply_updates(
    tracker: &dyn IssueTracker,
    updates: &[IssueUpdate],
) -> Vec<UpdateOutcome> {
    let mut pending: FuturesUnordered<_> = updates
        .iter()
        .map(|update| apply_update(tracker, update))
        .collect();

    let mut outcomes = Vec::with_capacity(updates.len());

    while let Some(outcome) = pending.next().await {
        report(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}

fn report(outcome: &UpdateOutcome) {
    println!(
        "\nUpdating status & work log of {}...",
        style(&outcome.key).blue()
    );

    for (what, result) in [
        ("Issue status updated successfully!", &outcome.status),
        ("Work log updated successfully!", &outcome.worklog),
    ] {
        match result {
            Ok(()) => println!("\t{}", style(format!("✓ {what}")).green()),
            Err(e) => eprintln!("\t{}", style(format!("✗ {e}")).red()),
        }
    }
}

/// Turns the outcomes into the run's result.
///
/// # Errors
/// * `CzJiraError::TrackerUpdatesFailed` if any call failed
pub fn summarize(outcomes: &[UpdateOutcome]) -> Result<()> {
    let failed: usize = outcomes.iter().map(UpdateOutcome::failures).sum();

    if failed == 0 {
        Ok(())
    } else {
        Err(CzJiraError::TrackerUpdatesFailed { failed })
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeTracker;
    use super::*;

    fn update(key: &str) -> IssueUpdate {
        IssueUpdate {
            key: key.to_string(),
            transition_id: "31".to_string(),
            time_spent: "1h".to_string(),
        }
    }

    #[tokio::test]
    async fn test_issue_choices_degrade_to_sentinel() {
        let tracker = FakeTracker::default();

        let choices = issue_choices(&tracker).await;

        assert_eq!(choices, vec![IssueChoice::sentinel()]);
    }

    #[tokio::test]
    async fn test_issue_choices_put_sentinel_first() {
        let issue = IssueChoice {
            key: Some("CORE-1".to_string()),
            priority: Some("High".to_string()),
            label: "CORE-1 — Bug [High]: crash".to_string(),
        };
        let tracker = FakeTracker {
            issues: Some(vec![issue.clone()]),
            ..FakeTracker::default()
        };

        let choices = issue_choices(&tracker).await;

        assert_eq!(choices, vec![IssueChoice::sentinel(), issue]);
    }

    #[tokio::test]
    async fn test_transition_choices_none_on_failure() {
        let tracker = FakeTracker {
            broken_transitions: vec!["CORE-1".to_string()],
            ..FakeTracker::default()
        };

        assert!(transition_choices(&tracker, "CORE-1").await.is_none());
        assert_eq!(
            transition_choices(&tracker, "CORE-2").await,
            Some(vec![TransitionChoice::sentinel()])
        );
    }

    #[tokio::test]
    async fn test_failed_update_does_not_block_other_issues() {
        let tracker = FakeTracker {
            rejected_status: vec!["CORE-1".to_string()],
            ..FakeTracker::default()
        };

        let outcomes = apply_updates(&tracker, &[update("CORE-1"), update("CORE-2")]).await;

        assert_eq!(outcomes.len(), 2);

        let first = outcomes.iter().find(|o| o.key == "CORE-1").unwrap();
        assert!(first.status.is_err());
        assert!(first.worklog.is_ok());

        let second = outcomes.iter().find(|o| o.key == "CORE-2").unwrap();
        assert_eq!(second.failures(), 0);

        let calls = tracker.calls.lock().unwrap();
        assert!(calls.contains(&"worklog CORE-1 1h".to_string()));
        assert!(calls.contains(&"transition CORE-2 31".to_string()));
        assert!(calls.contains(&"worklog CORE-2 1h".to_string()));

        assert!(matches!(
            summarize(&outcomes),
            Err(CzJiraError::TrackerUpdatesFailed { failed: 1 })
        ));
    }

    #[tokio::test]
    async fn test_no_updates_is_success() {
        let tracker = FakeTracker::default();

        let outcomes = apply_updates(&tracker, &[]).await;

        assert!(outcomes.is_empty());
        assert!(summarize(&outcomes).is_ok());
    }
}
