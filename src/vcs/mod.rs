//! Version Control Client
//!
//! [`VersionControl`] is the capability the orchestrator consumes for local
//! repository work. [`GitCli`] implements it with the system `git` binary,
//! which keeps behaviour identical to what the user would get typing the
//! commands themselves (credential helpers, hooks, config all apply).
//!
//! ## Idempotence
//!
//! - [`VersionControl::ensure_initialized`] is a no-op when the path is already a repository root
//! - [`VersionControl::add_or_update_remote`] is a no-op when `origin` already has the URL
//!
//! Everything else either changes state or fails fast with a specific
//! [`VcsErrorKind`](crate::errors::VcsErrorKind).

pub mod git;

pub use git::GitCli;

use crate::errors::VcsError;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Make `path` a git repository root unless it already is one
    ///
    /// A directory nested inside another work tree gets its own repository.
    async fn ensure_initialized(&self, path: &Path) -> Result<(), VcsError>;

    /// Stage every change in the work tree
    async fn stage_all(&self, path: &Path) -> Result<(), VcsError>;

    /// Commit staged changes and return the new commit id
    ///
    /// Fails with `NothingToCommit` on a clean tree.
    async fn commit(&self, path: &Path, message: &str) -> Result<String, VcsError>;

    /// Create a branch at `HEAD`; fails with `BranchExists` if the name is taken
    async fn create_branch(&self, path: &Path, name: &str) -> Result<(), VcsError>;

    async fn checkout(&self, path: &Path, name: &str) -> Result<(), VcsError>;

    /// Point `origin` at `url`, adding the remote if needed
    async fn add_or_update_remote(&self, path: &Path, url: &str) -> Result<(), VcsError>;

    /// Push `branch` to `origin`
    async fn push(&self, path: &Path, branch: &str, set_upstream: bool) -> Result<(), VcsError>;

    async fn current_branch(&self, path: &Path) -> Result<String, VcsError>;

    /// URL of `origin`, or `None` when the remote is not configured
    async fn remote_url(&self, path: &Path) -> Result<Option<String>, VcsError>;
}
