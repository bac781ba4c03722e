//! [`RepositoryHost`] backed by the GitHub REST API

use super::{
    HostedRepository, NewPullRequest, NewRepository, OpenedPullRequest, RepositoryHost,
};
use crate::config::Token;
use crate::constants::github::DEFAULT_BASE_BRANCH;
use crate::errors::{HostError, HostErrorKind};
use async_trait::async_trait;
use gitflow_github::{
    ApiError, CreateRepositoryParams, GitHubClient, PullRequestParams, Repository,
};
use tokio::sync::OnceCell;

pub struct GitHubHost {
    client: GitHubClient,
    /// Login of the token's user, looked up once on demand
    owner: OnceCell<String>,
}

/// Which call an [`ApiError`] came from; 404 and 422 mean different things per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    CreateRepository,
    GetRepository,
    CurrentUser,
    CreatePullRequest,
}

impl GitHubHost {
    pub fn new(token: &Token) -> Result<Self, HostError> {
        let client = GitHubClient::new(token.expose())
            .map_err(|e| HostError::new(HostErrorKind::Transport, e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: GitHubClient) -> Self {
        Self {
            client,
            owner: OnceCell::new(),
        }
    }

    async fn owner(&self) -> Result<&str, HostError> {
        let login = self
            .owner
            .get_or_try_init(|| async {
                self.client
                    .get_authenticated_user()
                    .await
                    .map(|user| user.login)
                    .map_err(|e| map_api_error(Call::CurrentUser, e))
            })
            .await?;
        Ok(login.as_str())
    }

    /// Split `owner/name`, filling the owner in from the token when omitted
    async fn qualify<'n>(&self, name: &'n str) -> Result<(String, &'n str), HostError> {
        match name.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo))
            }
            Some(_) => Err(HostError::new(
                HostErrorKind::NotFound,
                format!("'{}' is not a valid repository name", name),
            )),
            None => Ok((self.owner().await?.to_string(), name)),
        }
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn create_repository(&self, request: &NewRepository) -> Result<HostedRepository, HostError> {
        let params = CreateRepositoryParams {
            name: &request.name,
            description: &request.description,
            private: request.visibility.is_private(),
            auto_init: request.auto_init,
        };

        self.client
            .create_repository(params)
            .await
            .map(hosted)
            .map_err(|e| map_api_error(Call::CreateRepository, e))
    }

    async fn verify_repository_exists(&self, name: &str) -> Result<HostedRepository, HostError> {
        let (owner, repo) = self.qualify(name).await?;

        self.client
            .get_repository(&owner, repo)
            .await
            .map(hosted)
            .map_err(|e| map_api_error(Call::GetRepository, e))
    }

    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<OpenedPullRequest, HostError> {
        let (owner, repo) = self.qualify(&request.repository).await?;

        let params = PullRequestParams {
            owner: &owner,
            repo,
            title: &request.title,
            head: &request.head,
            base: &request.base,
            body: &request.body,
            draft: request.draft,
        };

        let pr = self
            .client
            .create_pull_request(params)
            .await
            .map_err(|e| map_api_error(Call::CreatePullRequest, e))?;

        Ok(OpenedPullRequest {
            repository: format!("{}/{}", owner, repo),
            url: pr.html_url,
            number: pr.number,
        })
    }
}

fn hosted(repository: Repository) -> HostedRepository {
    HostedRepository {
        full_name: repository.full_name,
        url: repository.html_url,
        clone_url: repository.clone_url,
        default_branch: repository
            .default_branch
            .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
    }
}

fn map_api_error(call: Call, error: ApiError) -> HostError {
    let message = error.to_string();

    let kind = match &error {
        ApiError::Unauthorized { .. } => HostErrorKind::AuthFailed,
        ApiError::RateLimited { .. } => HostErrorKind::RateLimited,
        ApiError::Timeout => HostErrorKind::Timeout,
        ApiError::Transport(_) => HostErrorKind::Transport,
        ApiError::NotFound { .. } => match call {
            // POST /user/repos only 404s for tokens lacking the repo scope
            Call::CreateRepository | Call::CurrentUser => HostErrorKind::AuthFailed,
            Call::GetRepository | Call::CreatePullRequest => HostErrorKind::NotFound,
        },
        ApiError::Unprocessable { message } => {
            let lower = message.to_lowercase();
            match call {
                Call::CreateRepository if lower.contains("already exists") => {
                    HostErrorKind::AlreadyExists
                }
                Call::CreatePullRequest if lower.contains("no commits between") => {
                    HostErrorKind::NoCommitsBetween
                }
                Call::CreatePullRequest if lower.contains("already exists") => {
                    HostErrorKind::AlreadyExists
                }
                _ => HostErrorKind::ApiError,
            }
        }
        ApiError::Status { .. } | ApiError::Decode(_) => HostErrorKind::ApiError,
    };

    HostError::new(kind, message)
}
