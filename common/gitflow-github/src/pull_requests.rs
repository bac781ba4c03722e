//! Pull request operations

use crate::client::GitHubClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct CreatePullRequestPayload<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PullRequest {
    pub html_url: String,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
}

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct PullRequestParams<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub title: &'a str,
    pub head: &'a str,
    pub base: &'a str,
    pub body: &'a str,
    pub draft: bool,
}

impl GitHubClient {
    /// Open a pull request from `head` into `base`
    ///
    /// # Errors
    /// GitHub answers 422 when the two branches have no commits between them;
    /// that surfaces as [`ApiError::Unprocessable`] carrying GitHub's message.
    pub async fn create_pull_request(
        &self,
        params: PullRequestParams<'_>,
    ) -> Result<PullRequest, ApiError> {
        let path = format!("/repos/{}/{}/pulls", params.owner, params.repo);

        let payload = CreatePullRequestPayload {
            title: params.title,
            head: params.head,
            base: params.base,
            body: params.body,
            draft: if params.draft { Some(true) } else { None },
        };

        tracing::debug!(%path, head = params.head, base = params.base, "POST");

        let response = self
            .send(self.request(Method::POST, &path).json(&payload))
            .await?;

        Ok(response.json().await?)
    }
}
