//! GitHub REST client used by the gitflow orchestrator
//!
//! This library wraps the handful of GitHub API endpoints gitflow needs:
//! creating and looking up repositories, resolving the authenticated user,
//! and opening pull requests. Failures are classified into [`ApiError`]
//! variants so callers can tell an authentication problem from a name
//! collision or a rate limit without parsing strings.
//!
//! ## Modules
//!
//! - [`client`]: Authenticated HTTP client and request helpers
//! - [`error`]: API error classification
//! - [`pull_requests`]: Pull request creation
//! - [`repositories`]: Repository creation and lookup
//! - [`util`]: Remote URL parsing

mod client;
mod error;
mod pull_requests;
mod repositories;
mod util;

// Re-export public API
pub use client::{API_BASE, DEFAULT_TIMEOUT, GitHubClient};
pub use error::ApiError;
pub use pull_requests::{PullRequest, PullRequestParams};
pub use repositories::{CreateRepositoryParams, Repository, User};
pub use util::{RepositorySlug, parse_remote_url};
