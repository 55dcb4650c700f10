//! Integration tests for the Jira client against a mocked REST API.

use czjira::config::JiraSettings;
use czjira::errors::{CzJiraError, TrackerError};
use czjira::jira::{
    IssueChoice, IssueTracker, JiraClient, TransitionChoice, apply_updates, issue_choices,
    summarize, transition_choices,
};
use czjira::wizard::answers::IssueUpdate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `dev:secret`, base64 encoded.
const BASIC_AUTH: &str = "Basic ZGV2OnNlY3JldA==";

fn client(server: &MockServer) -> JiraClient {
    JiraClient::new(JiraSettings {
        base_url: server.uri(),
        project: "CORE".to_string(),
        issue_filters: vec!["To Do".to_string(), "In Progress".to_string()],
        transition_filters: vec!["Start Progress".to_string(), "Resolve".to_string()],
        user: "dev".to_string(),
        token: "secret".to_string(),
    })
    .expect("Failed to build the Jira client")
}

fn update(key: &str) -> IssueUpdate {
    IssueUpdate {
        key: key.to_string(),
        transition_id: "31".to_string(),
        time_spent: "1d 2h".to_string(),
    }
}

#[tokio::test]
async fn test_search_maps_issues_into_choices() {
    let server = MockServer::start().await;
    let summary = "A very long summary that goes well past the fifty character limit";

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("authorization", BASIC_AUTH))
        .and(query_param(
            "jql",
            "project = \"CORE\" AND status IN (\"To Do\", \"In Progress\") AND assignee = currentUser() ORDER BY updated DESC",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issues": [
                {
                    "key": "CORE-7",
                    "fields": {
                        "summary": summary,
                        "priority": { "name": "High" },
                        "issuetype": { "name": "Bug" }
                    }
                },
                {
                    "key": "CORE-9",
                    "fields": { "summary": "Short one" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issues = client(&server).assigned_issues().await.unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].key.as_deref(), Some("CORE-7"));
    assert_eq!(issues[0].priority.as_deref(), Some("High"));
    assert_eq!(
        issues[0].label,
        format!("CORE-7 — Bug [High]: {}...", &summary[..50])
    );
    assert_eq!(issues[1].key.as_deref(), Some("CORE-9"));
    assert!(issues[1].label.ends_with(": Short one"));
}

#[tokio::test]
async fn test_failed_search_leaves_only_the_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);

    assert!(matches!(
        client.assigned_issues().await,
        Err(CzJiraError::Tracker(TrackerError::UnexpectedStatus { status: 500, .. }))
    ));
    assert_eq!(issue_choices(&client).await, vec![IssueChoice::sentinel()]);
}

#[tokio::test]
async fn test_transitions_are_filtered_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issue/CORE-7/transitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transitions": [
                { "id": "11", "name": "Start Progress", "to": { "name": "In Progress" } },
                { "id": "21", "name": "Close", "to": { "name": "Closed" } },
                { "id": "31", "name": "Resolve", "to": { "name": "Resolved" } }
            ]
        })))
        .mount(&server)
        .await;

    let choices = transition_choices(&client(&server), "CORE-7").await.unwrap();

    assert_eq!(
        choices,
        vec![
            TransitionChoice::sentinel(),
            TransitionChoice {
                id: Some("11".to_string()),
                label: "Start Progress [In Progress]".to_string(),
            },
            TransitionChoice {
                id: Some("31".to_string()),
                label: "Resolve [Resolved]".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_failed_transition_lookup_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issue/CORE-7/transitions"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(transition_choices(&client(&server), "CORE-7").await.is_none());
}

#[tokio::test]
async fn test_updates_post_status_and_worklog() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-7/transitions"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({ "transition": { "id": "31" } })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-7/worklog"))
        .and(body_json(json!({ "timeSpent": "1d 2h" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "10000" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcomes = apply_updates(&client(&server), &[update("CORE-7")]).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].status.is_ok());
    assert!(outcomes[0].worklog.is_ok());
    assert!(summarize(&outcomes).is_ok());
}

#[tokio::test]
async fn test_one_rejected_issue_does_not_stop_the_others() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-1/transitions"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-2/transitions"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-1/worklog"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/issue/CORE-2/worklog"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcomes = apply_updates(&client(&server), &[update("CORE-1"), update("CORE-2")]).await;

    let rejected = outcomes.iter().find(|o| o.key == "CORE-1").unwrap();
    assert!(matches!(
        rejected.status,
        Err(CzJiraError::Tracker(TrackerError::UnexpectedStatus { status: 400, .. }))
    ));
    assert!(rejected.worklog.is_ok());

    let accepted = outcomes.iter().find(|o| o.key == "CORE-2").unwrap();
    assert_eq!(accepted.failures(), 0);

    assert!(matches!(
        summarize(&outcomes),
        Err(CzJiraError::TrackerUpdatesFailed { failed: 1 })
    ));
}
