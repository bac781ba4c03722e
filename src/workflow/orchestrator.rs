//! Workflow Orchestrator
//!
//! Runs the planned steps for one action strictly in order, one collaborator
//! call at a time. Every step result is inspected before the next step is
//! issued; the first failure stops the pipeline. Nothing is retried and
//! nothing is rolled back: a failure after a lasting side effect (a created
//! repository, a commit, a pushed branch) is reported as
//! [`OutcomeStatus::PartialSuccess`](super::OutcomeStatus::PartialSuccess) so
//! the caller can re-run the safe remainder instead of repeating the create.

use super::action::{Action, ActionKind};
use super::outcome::{Outcome, StepError};
use super::plan::plan;
use super::step::{BranchTarget, Operation, OperationStep, StepDetails, StepEffect, StepResult};
use crate::config::EffectiveConfig;
use crate::errors::{ErrorKind, HostError, VcsError, VcsErrorKind};
use crate::host::{HostedRepository, NewPullRequest, NewRepository, RepositoryHost};
use crate::report::Logger;
use crate::utils::title_from_branch;
use crate::vcs::VersionControl;
use gitflow_github::parse_remote_url;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Run `action` against the given collaborators
///
/// `host` is `None` when no token was configured; any remote step then fails
/// with [`ErrorKind::MissingToken`] without contacting anything.
pub async fn execute(
    action: &Action,
    config: &EffectiveConfig,
    vcs: &dyn VersionControl,
    host: Option<&dyn RepositoryHost>,
) -> Outcome {
    Orchestrator::new(vcs, host).run(action, config).await
}

pub struct Orchestrator<'a> {
    vcs: &'a dyn VersionControl,
    host: Option<&'a dyn RepositoryHost>,
    cancellation: CancellationToken,
    logger: Logger,
}

/// Why a step failed
#[derive(Debug)]
struct StepFailure {
    kind: ErrorKind,
    message: String,
}

impl StepFailure {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<VcsError> for StepFailure {
    fn from(error: VcsError) -> Self {
        Self::new(error.kind.into(), error.message)
    }
}

impl From<HostError> for StepFailure {
    fn from(error: HostError) -> Self {
        Self::new(error.kind.into(), error.message)
    }
}

/// Facts accumulated while a pipeline runs
struct Run {
    action: ActionKind,
    completed: Vec<StepResult>,
    repository: Option<String>,
    repository_url: Option<String>,
    clone_url: Option<String>,
    branch: Option<String>,
    head: Option<String>,
}

impl Run {
    fn new(action: &Action, config: &EffectiveConfig) -> Self {
        let branch = match action {
            Action::Create if config.push_after_create => Some(config.branch.clone()),
            Action::Create => None,
            Action::Push => Some(config.branch.clone()),
            Action::Commit { branch, .. } => branch.clone(),
            Action::Branch { name } => Some(name.clone()),
            Action::PullRequest { .. } => None,
        };

        Self {
            action: action.kind(),
            completed: Vec::new(),
            repository: config.repo_name.clone(),
            repository_url: None,
            clone_url: None,
            branch,
            head: None,
        }
    }

    fn record(&mut self, step: OperationStep, details: StepDetails, effect: StepEffect) {
        match &details {
            StepDetails::Repository {
                full_name,
                url,
                clone_url,
                ..
            } => {
                self.repository = Some(full_name.clone());
                self.repository_url = Some(url.clone());
                self.clone_url = Some(clone_url.clone());
            }
            StepDetails::Pushed { branch } => self.branch = Some(branch.clone()),
            StepDetails::Branch { name } => {
                self.head = Some(name.clone());
                self.branch = Some(name.clone());
            }
            StepDetails::PullRequest {
                repository, url, ..
            } => {
                self.repository = Some(repository.clone());
                self.repository_url = Some(url.clone());
            }
            StepDetails::Done | StepDetails::Committed { .. } | StepDetails::CommitSkipped => {}
        }

        self.completed.push(StepResult::Success {
            step,
            details,
            effect,
        });
    }

    fn finish(self, error: Option<StepError>) -> Outcome {
        let status = Outcome::status_for(&self.completed, error.is_some());
        Outcome {
            action: self.action,
            status,
            completed_steps: self.completed,
            repository: self.repository,
            repository_url: self.repository_url,
            branch: self.branch,
            errors: error.into_iter().collect(),
        }
    }
}

impl<'a> Orchestrator<'a> {
    pub fn new(vcs: &'a dyn VersionControl, host: Option<&'a dyn RepositoryHost>) -> Self {
        Self {
            vcs,
            host,
            cancellation: CancellationToken::new(),
            logger: Logger::disabled(),
        }
    }

    /// Print progress lines as steps complete
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Stop before the next step once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub async fn run(&self, action: &Action, config: &EffectiveConfig) -> Outcome {
        let steps = plan(action, config);
        let mut run = Run::new(action, config);

        info!(action = %action.kind(), steps = steps.len(), "starting workflow");

        for step in steps {
            if self.cancellation.is_cancelled() {
                warn!(step = %step.description, "interrupted; not starting step");
                self.logger.warn(run.action, "Interrupted");
                let error = StepError {
                    step: Some(step.description),
                    kind: ErrorKind::Cancelled,
                    message: "interrupted before this step started".to_string(),
                };
                return run.finish(Some(error));
            }

            debug!(step = %step.description, kind = ?step.kind(), "dispatching step");

            match self.dispatch(&step.operation, &mut run, config).await {
                Ok((details, effect)) => {
                    info!(step = %step.description, "step completed");
                    if details == StepDetails::CommitSkipped {
                        self.logger
                            .warn(run.action, "Nothing to commit; working tree clean");
                    } else {
                        self.logger.success(run.action, &step.description);
                    }
                    run.record(step, details, effect);
                }
                Err(failure) => {
                    warn!(
                        step = %step.description,
                        kind = %failure.kind,
                        "step failed: {}",
                        failure.message
                    );
                    self.logger.error(
                        run.action,
                        &format!("{}: {}", step.description, failure.message),
                    );
                    let error = StepError {
                        step: Some(step.description),
                        kind: failure.kind,
                        message: failure.message,
                    };
                    return run.finish(Some(error));
                }
            }
        }

        if matches!(action, Action::Commit { .. } | Action::Branch { .. }) {
            self.describe_origin(&mut run, config).await;
        }

        run.finish(None)
    }

    fn host(&self) -> Result<&'a dyn RepositoryHost, StepFailure> {
        self.host
            .ok_or_else(|| StepFailure::new(ErrorKind::MissingToken, "no GitHub token configured"))
    }

    async fn dispatch(
        &self,
        operation: &Operation,
        run: &mut Run,
        config: &EffectiveConfig,
    ) -> Result<(StepDetails, StepEffect), StepFailure> {
        let path = config.local_path.as_path();
        let effect = operation.effect();

        let details = match operation {
            Operation::CreateRepository {
                name,
                description,
                visibility,
                auto_init,
            } => {
                let request = NewRepository {
                    name: name.clone(),
                    description: description.clone(),
                    visibility: *visibility,
                    auto_init: *auto_init,
                };
                repository_details(self.host()?.create_repository(&request).await?)
            }
            Operation::VerifyRepository { name } => {
                repository_details(self.host()?.verify_repository_exists(name).await?)
            }
            Operation::EnsureInitialized => {
                self.vcs.ensure_initialized(path).await?;
                StepDetails::Done
            }
            Operation::StageAll => {
                self.vcs.stage_all(path).await?;
                StepDetails::Done
            }
            Operation::Commit {
                message,
                skip_if_clean,
            } => match self.vcs.commit(path, message).await {
                Ok(sha) => StepDetails::Committed { sha },
                Err(e) if *skip_if_clean && e.kind == VcsErrorKind::NothingToCommit => {
                    debug!("working tree clean; nothing to commit");
                    return Ok((StepDetails::CommitSkipped, StepEffect::Idempotent));
                }
                Err(e) => return Err(e.into()),
            },
            Operation::AddOrUpdateRemote => {
                let url = run.clone_url.clone().ok_or_else(|| {
                    StepFailure::new(ErrorKind::NoRemote, "no repository URL known for origin")
                })?;
                self.vcs.add_or_update_remote(path, &url).await?;
                StepDetails::Done
            }
            Operation::Push {
                branch,
                set_upstream,
            } => {
                let branch = match branch {
                    BranchTarget::Named(name) => name.clone(),
                    BranchTarget::Current => self.vcs.current_branch(path).await?,
                };
                self.vcs.push(path, &branch, *set_upstream).await?;
                StepDetails::Pushed { branch }
            }
            Operation::CreateBranch { name } => {
                self.vcs.create_branch(path, name).await?;
                StepDetails::Done
            }
            Operation::Checkout { name } => {
                self.vcs.checkout(path, name).await?;
                StepDetails::Done
            }
            Operation::CurrentBranch => StepDetails::Branch {
                name: self.vcs.current_branch(path).await?,
            },
            Operation::CreatePullRequest {
                title,
                body,
                base,
                draft,
            } => {
                let head = run.head.clone().ok_or_else(|| {
                    StepFailure::new(ErrorKind::InvalidBranch, "current branch is unknown")
                })?;
                if head == *base {
                    return Err(StepFailure::new(
                        ErrorKind::InvalidBranch,
                        format!(
                            "cannot open a pull request from '{}' into itself; switch to a feature branch first",
                            base
                        ),
                    ));
                }

                let host = self.host()?;
                let repository = self.pull_request_repository(config).await?;
                let request = NewPullRequest {
                    repository,
                    title: title.clone().unwrap_or_else(|| title_from_branch(&head)),
                    head,
                    base: base.clone(),
                    body: body.clone(),
                    draft: *draft,
                };

                let opened = host.create_pull_request(&request).await?;
                StepDetails::PullRequest {
                    repository: opened.repository,
                    url: opened.url,
                    number: opened.number,
                }
            }
        };

        Ok((details, effect))
    }

    /// Configured repository name, else the one `origin` points at
    async fn pull_request_repository(&self, config: &EffectiveConfig) -> Result<String, StepFailure> {
        if let Some(name) = &config.repo_name {
            return Ok(name.clone());
        }

        let url = self
            .vcs
            .remote_url(&config.local_path)
            .await?
            .ok_or_else(|| StepFailure::new(ErrorKind::NoRemote, "no origin remote configured"))?;

        parse_remote_url(&url)
            .map(|slug| slug.to_string())
            .ok_or_else(|| {
                StepFailure::new(
                    ErrorKind::NoRemote,
                    "origin remote is not a hosted repository URL",
                )
            })
    }

    /// Fill in repository facts from `origin` after a purely local workflow
    async fn describe_origin(&self, run: &mut Run, config: &EffectiveConfig) {
        let url = match self.vcs.remote_url(&config.local_path).await {
            Ok(Some(url)) => url,
            Ok(None) => return,
            Err(e) => {
                debug!(error = %e, "could not read origin remote");
                return;
            }
        };

        let Some(slug) = parse_remote_url(&url) else {
            return;
        };

        let browse_url = match (run.action, &run.branch) {
            (ActionKind::Branch, Some(branch)) => format!("{}/tree/{}", slug.html_url(), branch),
            _ => slug.html_url(),
        };

        run.repository = Some(slug.to_string());
        run.repository_url = Some(browse_url);
    }
}

fn repository_details(repository: HostedRepository) -> StepDetails {
    StepDetails::Repository {
        full_name: repository.full_name,
        url: repository.url,
        clone_url: repository.clone_url,
        default_branch: repository.default_branch,
    }
}
