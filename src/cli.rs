//! Command-line surface

use crate::config::{CliOverrides, OutputMode, Token};
use crate::constants;
use crate::workflow::{Action, ActionKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitflow")]
#[command(about = "Create GitHub repositories, push, commit, branch and open pull requests in one step")]
#[command(version)]
pub struct Cli {
    /// Print a single JSON document instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    pub config: String,

    /// GitHub token (defaults to the config file, then GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Local repository location, shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct PathArg {
    /// Path of the local repository (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a GitHub repository and push the local tree to it
    Create {
        /// Repository name
        #[arg(short, long)]
        name: Option<String>,

        /// Repository description
        #[arg(short, long)]
        description: Option<String>,

        /// Create a private repository
        #[arg(short, long, conflicts_with = "public")]
        private: bool,

        /// Create a public repository
        #[arg(long)]
        public: bool,

        /// Only create the repository; do not push local code
        #[arg(long, conflicts_with = "push")]
        no_push: bool,

        /// Push local code after creating the repository
        #[arg(long)]
        push: bool,

        /// Branch to push
        #[arg(short, long)]
        branch: Option<String>,

        #[command(flatten)]
        path: PathArg,
    },

    /// Push the local tree to an existing GitHub repository
    Push {
        /// Repository name, optionally as owner/name
        #[arg(short, long)]
        name: Option<String>,

        /// Branch to push
        #[arg(short, long)]
        branch: Option<String>,

        #[command(flatten)]
        path: PathArg,
    },

    /// Stage all changes, commit and push
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Branch to push (defaults to the current branch)
        #[arg(short, long)]
        branch: Option<String>,

        #[command(flatten)]
        path: PathArg,
    },

    /// Create a branch, switch to it and push it
    Branch {
        /// Name of the new branch
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        path: PathArg,
    },

    /// Open a pull request from the current branch
    Pr {
        /// Pull request title (defaults to the branch name)
        #[arg(short, long)]
        title: Option<String>,

        /// Pull request body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Base branch
        #[arg(long, default_value_t = constants::github::DEFAULT_BASE_BRANCH.to_string())]
        base: String,

        /// Open the pull request as a draft
        #[arg(long)]
        draft: bool,

        /// Repository as owner/name (defaults to the origin remote)
        #[arg(short, long)]
        repo: Option<String>,

        #[command(flatten)]
        path: PathArg,
    },
}

impl Cli {
    pub fn action_kind(&self) -> ActionKind {
        match &self.command {
            Commands::Create { .. } => ActionKind::Create,
            Commands::Push { .. } => ActionKind::Push,
            Commands::Commit { .. } => ActionKind::Commit,
            Commands::Branch { .. } => ActionKind::Branch,
            Commands::Pr { .. } => ActionKind::PullRequest,
        }
    }

    /// Output mode requested on the command line, if any
    pub fn output_override(&self) -> Option<OutputMode> {
        self.json.then_some(OutputMode::Json)
    }

    /// Split the parsed command line into the action and its setting overrides
    pub fn into_request(self) -> (Action, CliOverrides) {
        let mut overrides = CliOverrides::new(self.action_kind());
        overrides.token = self.token.map(Token::new);
        overrides.output = self.json.then_some(OutputMode::Json);

        let action = match self.command {
            Commands::Create {
                name,
                description,
                private,
                public,
                no_push,
                push,
                branch,
                path,
            } => {
                overrides.repo_name = name;
                overrides.description = description;
                overrides.private = flag_pair(private, public);
                overrides.push_after_create = flag_pair(push, no_push);
                overrides.branch = branch;
                overrides.local_path = path.path;
                Action::Create
            }
            Commands::Push { name, branch, path } => {
                overrides.repo_name = name;
                overrides.branch = branch;
                overrides.local_path = path.path;
                Action::Push
            }
            Commands::Commit {
                message,
                branch,
                path,
            } => {
                overrides.local_path = path.path;
                Action::Commit { message, branch }
            }
            Commands::Branch { name, path } => {
                overrides.local_path = path.path;
                Action::Branch { name }
            }
            Commands::Pr {
                title,
                body,
                base,
                draft,
                repo,
                path,
            } => {
                overrides.repo_name = repo;
                overrides.local_path = path.path;
                Action::PullRequest {
                    title,
                    body,
                    base,
                    draft,
                }
            }
        };

        (action, overrides)
    }
}

/// `Some(true)` for `--yes`, `Some(false)` for `--no`, `None` for neither
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
