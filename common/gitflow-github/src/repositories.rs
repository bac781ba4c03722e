//! Repository-related operations

use crate::client::GitHubClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct CreateRepositoryPayload<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

/// Parameters for creating a repository under the authenticated user
#[derive(Debug, Clone)]
pub struct CreateRepositoryParams<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub private: bool,
    /// Let GitHub create an initial commit with a README
    pub auto_init: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct User {
    pub login: String,
}

impl GitHubClient {
    /// Create a repository owned by the authenticated user
    ///
    /// # Errors
    /// Returns [`ApiError::Unprocessable`] when the name is taken or invalid and
    /// [`ApiError::Unauthorized`] when the token is rejected.
    pub async fn create_repository(
        &self,
        params: CreateRepositoryParams<'_>,
    ) -> Result<Repository, ApiError> {
        let payload = CreateRepositoryPayload {
            name: params.name,
            description: params.description,
            private: params.private,
            auto_init: params.auto_init,
        };

        tracing::debug!(name = params.name, private = params.private, "POST /user/repos");

        let response = self
            .send(self.request(Method::POST, "/user/repos").json(&payload))
            .await?;

        Ok(response.json().await?)
    }

    /// Look up a repository by owner and name
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, ApiError> {
        let path = format!("/repos/{}/{}", owner, repo);
        tracing::debug!(%path, "GET");

        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    /// Resolve the user the token belongs to
    pub async fn get_authenticated_user(&self) -> Result<User, ApiError> {
        tracing::debug!("GET /user");

        let response = self.send(self.request(Method::GET, "/user")).await?;
        Ok(response.json().await?)
    }
}
