//! Units of work dispatched to the collaborators

use crate::config::Visibility;
use crate::errors::ErrorKind;

/// Which collaborator executes a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Local,
    Remote,
}

/// What a completed step leaves behind
///
/// Only `Persistent` effects turn a later failure into a partial success:
/// read-only and idempotent steps are safe to run again as part of a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    ReadOnly,
    Idempotent,
    Persistent,
}

/// Push target of a push step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchTarget {
    Named(String),
    /// Whatever branch is checked out when the step runs
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateRepository {
        name: String,
        description: String,
        visibility: Visibility,
        auto_init: bool,
    },
    VerifyRepository {
        name: String,
    },
    EnsureInitialized,
    StageAll,
    Commit {
        message: String,
        /// A clean tree is a no-op instead of a failure
        skip_if_clean: bool,
    },
    /// Point `origin` at the repository URL learned by an earlier remote step
    AddOrUpdateRemote,
    Push {
        branch: BranchTarget,
        set_upstream: bool,
    },
    CreateBranch {
        name: String,
    },
    Checkout {
        name: String,
    },
    CurrentBranch,
    CreatePullRequest {
        title: Option<String>,
        body: String,
        base: String,
        draft: bool,
    },
}

impl Operation {
    pub fn kind(&self) -> StepKind {
        match self {
            Operation::CreateRepository { .. }
            | Operation::VerifyRepository { .. }
            | Operation::CreatePullRequest { .. } => StepKind::Remote,
            _ => StepKind::Local,
        }
    }

    /// Effect of a successful run; a skipped commit downgrades itself at runtime
    pub fn effect(&self) -> StepEffect {
        match self {
            Operation::VerifyRepository { .. } | Operation::CurrentBranch => StepEffect::ReadOnly,
            Operation::EnsureInitialized | Operation::StageAll | Operation::AddOrUpdateRemote => {
                StepEffect::Idempotent
            }
            Operation::CreateRepository { .. }
            | Operation::Commit { .. }
            | Operation::Push { .. }
            | Operation::CreateBranch { .. }
            | Operation::Checkout { .. }
            | Operation::CreatePullRequest { .. } => StepEffect::Persistent,
        }
    }

    fn describe(&self) -> String {
        match self {
            Operation::CreateRepository {
                name, visibility, ..
            } => {
                let scope = if visibility.is_private() {
                    "private"
                } else {
                    "public"
                };
                format!("Create {} repository '{}'", scope, name)
            }
            Operation::VerifyRepository { name } => format!("Verify repository '{}' exists", name),
            Operation::EnsureInitialized => "Initialize local repository".to_string(),
            Operation::StageAll => "Stage all changes".to_string(),
            Operation::Commit { message, .. } => format!("Commit '{}'", message),
            Operation::AddOrUpdateRemote => "Configure origin remote".to_string(),
            Operation::Push { branch, .. } => match branch {
                BranchTarget::Named(name) => format!("Push branch '{}'", name),
                BranchTarget::Current => "Push current branch".to_string(),
            },
            Operation::CreateBranch { name } => format!("Create branch '{}'", name),
            Operation::Checkout { name } => format!("Check out '{}'", name),
            Operation::CurrentBranch => "Determine current branch".to_string(),
            Operation::CreatePullRequest { base, .. } => {
                format!("Open pull request into '{}'", base)
            }
        }
    }
}

/// One planned unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStep {
    pub operation: Operation,
    pub description: String,
}

impl OperationStep {
    pub fn new(operation: Operation) -> Self {
        let description = operation.describe();
        Self {
            operation,
            description,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.operation.kind()
    }
}

/// What a successful step produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepDetails {
    Done,
    Repository {
        full_name: String,
        url: String,
        clone_url: String,
        default_branch: String,
    },
    Committed {
        sha: String,
    },
    /// Clean working tree; nothing was committed
    CommitSkipped,
    Pushed {
        branch: String,
    },
    Branch {
        name: String,
    },
    PullRequest {
        repository: String,
        url: String,
        number: u64,
    },
}

/// Tagged outcome of executing one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Success {
        step: OperationStep,
        details: StepDetails,
        effect: StepEffect,
    },
    Failure {
        step: OperationStep,
        kind: ErrorKind,
        message: String,
    },
}

impl StepResult {
    pub fn step(&self) -> &OperationStep {
        match self {
            StepResult::Success { step, .. } | StepResult::Failure { step, .. } => step,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepResult::Success { .. })
    }

    pub fn effect(&self) -> Option<StepEffect> {
        match self {
            StepResult::Success { effect, .. } => Some(*effect),
            StepResult::Failure { .. } => None,
        }
    }
}
