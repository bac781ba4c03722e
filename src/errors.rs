//! Error taxonomy shared by the resolver, the collaborators and the reporter
//!
//! Three families exist, matching where a failure originates:
//!
//! - [`ConfigError`]: raised by the resolver before any side effect
//! - [`VcsError`]: raised by the local version control client
//! - [`HostError`]: raised by the repository host client
//!
//! All of them collapse into [`ErrorKind`], which carries the stable
//! identifier used in JSON output and the sentence used in human output.

use std::fmt;
use thiserror::Error;

/// Stable classification of every failure gitflow can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Configuration
    MissingToken,
    InvalidFormat,
    InvalidPath,
    MissingRepositoryName,
    InvalidValue,
    // Local repository
    NotARepository,
    CommandNotFound,
    NothingToCommit,
    BranchExists,
    PushRejected,
    NoRemote,
    CommandFailed,
    // Repository host
    AuthFailed,
    AlreadyExists,
    NotFound,
    RateLimited,
    Timeout,
    NoCommitsBetween,
    InvalidBranch,
    ApiError,
    Transport,
    // Orchestration
    Cancelled,
}

impl ErrorKind {
    /// Identifier emitted in JSON output; never changes once released
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingToken => "missing_token",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::InvalidPath => "invalid_path",
            ErrorKind::MissingRepositoryName => "missing_repository_name",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::NotARepository => "not_a_repository",
            ErrorKind::CommandNotFound => "command_not_found",
            ErrorKind::NothingToCommit => "nothing_to_commit",
            ErrorKind::BranchExists => "branch_exists",
            ErrorKind::PushRejected => "push_rejected",
            ErrorKind::NoRemote => "no_remote",
            ErrorKind::CommandFailed => "command_failed",
            ErrorKind::AuthFailed => "auth_failed",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Timeout => "timeout",
            ErrorKind::NoCommitsBetween => "no_commits_between",
            ErrorKind::InvalidBranch => "invalid_branch",
            ErrorKind::ApiError => "api_error",
            ErrorKind::Transport => "transport_error",
            ErrorKind::Cancelled => "cancelled",
        }
    }

    /// Sentence shown in human output
    pub fn sentence(&self) -> &'static str {
        match self {
            ErrorKind::MissingToken => {
                "No GitHub token found. Pass --token, set GITHUB_TOKEN, or add `token` to the config file."
            }
            ErrorKind::InvalidFormat => "The configuration file could not be parsed.",
            ErrorKind::InvalidPath => "The local path does not exist.",
            ErrorKind::MissingRepositoryName => {
                "A repository name is required. Pass --name or set `repo_name` in the config file."
            }
            ErrorKind::InvalidValue => "A configuration value is not valid.",
            ErrorKind::NotARepository => "The local path is not a git repository.",
            ErrorKind::CommandNotFound => "git is not installed or not on PATH.",
            ErrorKind::NothingToCommit => "There are no changes to commit.",
            ErrorKind::BranchExists => "A branch with that name already exists.",
            ErrorKind::PushRejected => "The remote rejected the push.",
            ErrorKind::NoRemote => "The repository has no `origin` remote to work with.",
            ErrorKind::CommandFailed => "A git command failed.",
            ErrorKind::AuthFailed => "GitHub rejected the token. Check that it is valid and has the needed scopes.",
            ErrorKind::AlreadyExists => "A repository with that name already exists.",
            ErrorKind::NotFound => "The repository was not found on GitHub.",
            ErrorKind::RateLimited => "GitHub rate limit exceeded. Try again later.",
            ErrorKind::Timeout => "The request to GitHub timed out.",
            ErrorKind::NoCommitsBetween => "There are no commits between the head and base branches.",
            ErrorKind::InvalidBranch => "The current branch cannot be used as the pull request head.",
            ErrorKind::ApiError => "GitHub returned an unexpected error.",
            ErrorKind::Transport => "Could not reach GitHub.",
            ErrorKind::Cancelled => "The operation was interrupted.",
        }
    }

    /// Whether re-running the whole action later may succeed without user action
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::Timeout | ErrorKind::Transport
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration problems detected before any operation runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no GitHub token configured")]
    MissingToken,

    #[error("config file {path} is not valid: {reason}")]
    InvalidFormat { path: String, reason: String },

    #[error("local path does not exist: {0}")]
    InvalidPath(String),

    #[error("repository name is required")]
    MissingRepositoryName,

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::MissingToken => ErrorKind::MissingToken,
            ConfigError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            ConfigError::InvalidPath(_) => ErrorKind::InvalidPath,
            ConfigError::MissingRepositoryName => ErrorKind::MissingRepositoryName,
            ConfigError::InvalidValue { .. } => ErrorKind::InvalidValue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsErrorKind {
    NotARepository,
    CommandNotFound,
    NothingToCommit,
    BranchExists,
    PushRejected,
    CommandFailed,
}

/// A failed local repository operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VcsError {
    pub kind: VcsErrorKind,
    pub message: String,
}

impl VcsError {
    pub fn new(kind: VcsErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<VcsErrorKind> for ErrorKind {
    fn from(kind: VcsErrorKind) -> Self {
        match kind {
            VcsErrorKind::NotARepository => ErrorKind::NotARepository,
            VcsErrorKind::CommandNotFound => ErrorKind::CommandNotFound,
            VcsErrorKind::NothingToCommit => ErrorKind::NothingToCommit,
            VcsErrorKind::BranchExists => ErrorKind::BranchExists,
            VcsErrorKind::PushRejected => ErrorKind::PushRejected,
            VcsErrorKind::CommandFailed => ErrorKind::CommandFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    AuthFailed,
    AlreadyExists,
    NotFound,
    RateLimited,
    Timeout,
    NoCommitsBetween,
    ApiError,
    Transport,
}

/// A failed repository host operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
}

impl HostError {
    pub fn new(kind: HostErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<HostErrorKind> for ErrorKind {
    fn from(kind: HostErrorKind) -> Self {
        match kind {
            HostErrorKind::AuthFailed => ErrorKind::AuthFailed,
            HostErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
            HostErrorKind::NotFound => ErrorKind::NotFound,
            HostErrorKind::RateLimited => ErrorKind::RateLimited,
            HostErrorKind::Timeout => ErrorKind::Timeout,
            HostErrorKind::NoCommitsBetween => ErrorKind::NoCommitsBetween,
            HostErrorKind::ApiError => ErrorKind::ApiError,
            HostErrorKind::Transport => ErrorKind::Transport,
        }
    }
}
