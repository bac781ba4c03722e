//! The five workflows gitflow knows how to run

use std::fmt;

/// A requested workflow together with its action-specific parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create the remote repository, then optionally push the local tree to it
    Create,
    /// Push the local tree to an existing remote repository
    Push,
    /// Stage everything, commit and push
    Commit {
        message: String,
        /// Push target; the current branch when absent
        branch: Option<String>,
    },
    /// Create a branch, switch to it and publish it
    Branch { name: String },
    /// Open a pull request from the current branch
    PullRequest {
        /// Derived from the head branch name when absent
        title: Option<String>,
        body: String,
        base: String,
        draft: bool,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Create => ActionKind::Create,
            Action::Push => ActionKind::Push,
            Action::Commit { .. } => ActionKind::Commit,
            Action::Branch { .. } => ActionKind::Branch,
            Action::PullRequest { .. } => ActionKind::PullRequest,
        }
    }
}

/// Parameter-free tag of an [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Push,
    Commit,
    Branch,
    PullRequest,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Push => "push",
            ActionKind::Commit => "commit",
            ActionKind::Branch => "branch",
            ActionKind::PullRequest => "pr",
        }
    }

    /// Whether the workflow calls the repository host and therefore needs a token
    pub fn requires_remote(&self) -> bool {
        matches!(
            self,
            ActionKind::Create | ActionKind::Push | ActionKind::PullRequest
        )
    }

    /// Whether the workflow cannot run without a configured repository name
    pub fn requires_repo_name(&self) -> bool {
        matches!(self, ActionKind::Create | ActionKind::Push)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
