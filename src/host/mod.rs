//! Repository Host Client
//!
//! [`RepositoryHost`] is the capability the orchestrator consumes for remote
//! work. [`GitHubHost`] implements it on top of the `gitflow-github` REST
//! client and translates API failures into [`HostError`] kinds.

pub mod github;

pub use github::GitHubHost;

use crate::config::Visibility;
use crate::errors::HostError;
use async_trait::async_trait;

/// Repository to create under the authenticated account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    /// Ask the host to create an initial commit
    pub auto_init: bool,
}

/// A repository as known to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepository {
    /// `owner/name`
    pub full_name: String,
    /// Browser URL
    pub url: String,
    /// URL to configure as the `origin` remote
    pub clone_url: String,
    pub default_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// `owner/name`, or a bare name owned by the authenticated user
    pub repository: String,
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedPullRequest {
    pub repository: String,
    pub url: String,
    pub number: u64,
}

#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Create a repository; fails with `AlreadyExists` or `AuthFailed`
    async fn create_repository(&self, request: &NewRepository) -> Result<HostedRepository, HostError>;

    /// Look a repository up; fails with `NotFound` when it is absent
    async fn verify_repository_exists(&self, name: &str) -> Result<HostedRepository, HostError>;

    /// Open a pull request; fails with `NoCommitsBetween` or `AuthFailed`
    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<OpenedPullRequest, HostError>;
}
