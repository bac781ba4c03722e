//! Scripted collaborators for orchestrator tests
//!
//! Both fakes record every call in order and fail exactly the operations
//! they were told to fail.

#![allow(dead_code)]

use async_trait::async_trait;
use gitflow::config::{EffectiveConfig, OutputMode, Token, Visibility};
use gitflow::errors::{HostError, HostErrorKind, VcsError, VcsErrorKind};
use gitflow::host::{
    HostedRepository, NewPullRequest, NewRepository, OpenedPullRequest, RepositoryHost,
};
use gitflow::vcs::VersionControl;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Shared call log so tests can assert the interleaving of local and remote calls
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeVcs<'a> {
    log: &'a CallLog,
    failures: HashMap<&'static str, VcsErrorKind>,
    current_branch: String,
    remote_url: Option<String>,
}

impl<'a> FakeVcs<'a> {
    pub fn new(log: &'a CallLog) -> Self {
        Self {
            log,
            failures: HashMap::new(),
            current_branch: "main".to_string(),
            remote_url: None,
        }
    }

    /// Make `operation` (e.g. `"push"`) fail with `kind`
    pub fn failing(mut self, operation: &'static str, kind: VcsErrorKind) -> Self {
        self.failures.insert(operation, kind);
        self
    }

    pub fn on_branch(mut self, branch: &str) -> Self {
        self.current_branch = branch.to_string();
        self
    }

    pub fn with_remote(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    fn call(&self, operation: &'static str, call: String) -> Result<(), VcsError> {
        self.log.push(call);
        match self.failures.get(operation) {
            Some(kind) => Err(VcsError::new(*kind, format!("{} failed", operation))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<'a> VersionControl for FakeVcs<'a> {
    async fn ensure_initialized(&self, _path: &Path) -> Result<(), VcsError> {
        self.call("ensure_initialized", "vcs.ensure_initialized".into())
    }

    async fn stage_all(&self, _path: &Path) -> Result<(), VcsError> {
        self.call("stage_all", "vcs.stage_all".into())
    }

    async fn commit(&self, _path: &Path, message: &str) -> Result<String, VcsError> {
        self.call("commit", format!("vcs.commit({})", message))?;
        Ok("4b825dc642cb6eb9a060e54bf8d69288fbee4904".to_string())
    }

    async fn create_branch(&self, _path: &Path, name: &str) -> Result<(), VcsError> {
        self.call("create_branch", format!("vcs.create_branch({})", name))
    }

    async fn checkout(&self, _path: &Path, name: &str) -> Result<(), VcsError> {
        self.call("checkout", format!("vcs.checkout({})", name))
    }

    async fn add_or_update_remote(&self, _path: &Path, url: &str) -> Result<(), VcsError> {
        self.call("add_or_update_remote", format!("vcs.add_or_update_remote({})", url))
    }

    async fn push(&self, _path: &Path, branch: &str, set_upstream: bool) -> Result<(), VcsError> {
        self.call("push", format!("vcs.push({}, {})", branch, set_upstream))
    }

    async fn current_branch(&self, _path: &Path) -> Result<String, VcsError> {
        self.call("current_branch", "vcs.current_branch".into())?;
        Ok(self.current_branch.clone())
    }

    async fn remote_url(&self, _path: &Path) -> Result<Option<String>, VcsError> {
        self.call("remote_url", "vcs.remote_url".into())?;
        Ok(self.remote_url.clone())
    }
}

pub struct FakeHost<'a> {
    log: &'a CallLog,
    failures: HashMap<&'static str, HostErrorKind>,
    owner: String,
    pull_requests: Mutex<Vec<NewPullRequest>>,
    cancel_after_create: Option<CancellationToken>,
}

impl<'a> FakeHost<'a> {
    pub fn new(log: &'a CallLog) -> Self {
        Self {
            log,
            failures: HashMap::new(),
            owner: "octo".to_string(),
            pull_requests: Mutex::new(Vec::new()),
            cancel_after_create: None,
        }
    }

    pub fn failing(mut self, operation: &'static str, kind: HostErrorKind) -> Self {
        self.failures.insert(operation, kind);
        self
    }

    /// Cancel `token` once the repository has been created, as a Control-C
    /// arriving mid-request would
    pub fn cancelling_after_create(mut self, token: CancellationToken) -> Self {
        self.cancel_after_create = Some(token);
        self
    }

    /// Pull requests the orchestrator asked for
    pub fn pull_requests(&self) -> Vec<NewPullRequest> {
        self.pull_requests.lock().unwrap().clone()
    }

    fn call(&self, operation: &'static str, call: String) -> Result<(), HostError> {
        self.log.push(call);
        match self.failures.get(operation) {
            Some(kind) => Err(HostError::new(*kind, format!("{} failed", operation))),
            None => Ok(()),
        }
    }

    fn repository(&self, name: &str) -> HostedRepository {
        let full_name = if name.contains('/') {
            name.to_string()
        } else {
            format!("{}/{}", self.owner, name)
        };
        HostedRepository {
            url: format!("https://github.com/{}", full_name),
            clone_url: format!("https://github.com/{}.git", full_name),
            default_branch: "main".to_string(),
            full_name,
        }
    }
}

#[async_trait]
impl<'a> RepositoryHost for FakeHost<'a> {
    async fn create_repository(&self, request: &NewRepository) -> Result<HostedRepository, HostError> {
        self.call(
            "create_repository",
            format!(
                "host.create_repository({}, private={}, auto_init={})",
                request.name,
                request.visibility.is_private(),
                request.auto_init
            ),
        )?;
        if let Some(token) = &self.cancel_after_create {
            token.cancel();
        }
        Ok(self.repository(&request.name))
    }

    async fn verify_repository_exists(&self, name: &str) -> Result<HostedRepository, HostError> {
        self.call("verify_repository_exists", format!("host.verify_repository_exists({})", name))?;
        Ok(self.repository(name))
    }

    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<OpenedPullRequest, HostError> {
        self.call(
            "create_pull_request",
            format!(
                "host.create_pull_request({}, {} -> {})",
                request.repository, request.head, request.base
            ),
        )?;
        self.pull_requests.lock().unwrap().push(request.clone());
        Ok(OpenedPullRequest {
            repository: self.repository(&request.repository).full_name,
            url: format!("https://github.com/{}/pull/7", self.repository(&request.repository).full_name),
            number: 7,
        })
    }
}

/// A resolved configuration pointing at `path`
pub fn config(path: impl Into<PathBuf>) -> EffectiveConfig {
    EffectiveConfig {
        token: Some(Token::new("test-token")),
        repo_name: Some("demo".to_string()),
        description: None,
        visibility: Visibility::Public,
        local_path: path.into(),
        branch: "main".to_string(),
        push_after_create: true,
        output_mode: OutputMode::Human,
    }
}
