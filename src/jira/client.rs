//! HTTP client for the Jira REST API (v2 paths under `JIRA_BASE_URL`).

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    config::JiraSettings,
    errors::{ConfigError, Result, TrackerError},
};

use super::{
    IssueTracker,
    models::{
        IssueChoice, SearchResponse, TransitionChoice, TransitionId, TransitionRequest,
        TransitionsResponse, WorklogRequest,
    },
};

pub struct JiraClient {
    http: Client,
    settings: JiraSettings,
}

impl JiraClient {
    /// # Errors
    /// * If the underlying HTTP client cannot be built
    pub fn new(settings: JiraSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(JiraClient { http, settings })
    }

    /// The JQL used to list the current user's open issues.
    #[must_use]
    pub fn assigned_issues_jql(&self) -> String {
        let statuses = self
            .settings
            .issue_filters
            .iter()
            .map(|status| format!("\"{status}\""))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "project = \"{}\" AND status IN ({statuses}) AND assignee = currentUser() ORDER BY updated DESC",
            self.settings.project
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.settings.user, Some(&self.settings.token))
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        tracing::debug!(url, "jira request");

        self.authorized(request).send().await.map_err(|source| {
            TrackerError::Request {
                url: url.to_string(),
                source,
            }
            .into()
        })
    }

    fn expect_success(response: Response, action: &'static str, key: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(action, key, status = status.as_u16(), "jira rejected request");

            Err(TrackerError::UnexpectedStatus {
                action,
                key: key.to_string(),
                status: status.as_u16(),
            }
            .into())
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
        response.json::<T>().await.map_err(|source| {
            TrackerError::Decode {
                url: url.to_string(),
                source,
            }
            .into()
        })
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn assigned_issues(&self) -> Result<Vec<IssueChoice>> {
        let url = self.url("search");
        let jql = self.assigned_issues_jql();

        let request = self.http.get(&url).query(&[("jql", jql.as_str())]);
        let response = self.send(request, &url).await?;
        let response = Self::expect_success(response, "Issue search", &self.settings.project)?;
        let body: SearchResponse = Self::decode(response, &url).await?;

        Ok(body.issues.into_iter().map(IssueChoice::from).collect())
    }

    async fn transitions(&self, key: &str) -> Result<Vec<TransitionChoice>> {
        let url = self.url(&format!("issue/{key}/transitions"));

        let response = self.send(self.http.get(&url), &url).await?;
        let response = Self::expect_success(response, "Transition lookup", key)?;
        let body: TransitionsResponse = Self::decode(response, &url).await?;

        Ok(body
            .transitions
            .into_iter()
            .filter(|transition| self.settings.transition_filters.contains(&transition.name))
            .map(TransitionChoice::from)
            .collect())
    }

    async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
        let url = self.url(&format!("issue/{key}/transitions"));
        let body = TransitionRequest {
            transition: TransitionId { id: transition_id },
        };

        let response = self.send(self.http.post(&url).json(&body), &url).await?;
        Self::expect_success(response, "Status update", key)?;

        Ok(())
    }

    async fn log_work(&self, key: &str, time_spent: &str) -> Result<()> {
        let url = self.url(&format!("issue/{key}/worklog"));
        let body = WorklogRequest { time_spent };

        let response = self.send(self.http.post(&url).json(&body), &url).await?;
        Self::expect_success(response, "Work log update", key)?;

        Ok(())
    }
}
