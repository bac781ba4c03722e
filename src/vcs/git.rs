//! [`VersionControl`] backed by the system `git` binary

use super::VersionControl;
use crate::constants::git::REMOTE_NAME;
use crate::errors::{VcsError, VcsErrorKind};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Runs `git` subcommands inside the target directory
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different executable, e.g. an absolute path to git
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn output(&self, path: &Path, args: &[&str]) -> Result<Output, VcsError> {
        debug!(cwd = %path.display(), "git {}", args.join(" "));

        Command::new(&self.program)
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| spawn_error(&self.program, path, e))
    }

    /// Run a subcommand and return its trimmed stdout, failing on non-zero exit
    fn run(&self, path: &Path, args: &[&str]) -> Result<String, VcsError> {
        let output = self.output(path, args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(args, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a subcommand whose exit status is the answer
    fn succeeds(&self, path: &Path, args: &[&str]) -> Result<bool, VcsError> {
        Ok(self.output(path, args)?.status.success())
    }

    /// Whether `path` is the top of a work tree, not just somewhere inside one
    fn is_repository_root(&self, path: &Path) -> Result<bool, VcsError> {
        let output = self.output(path, &["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Ok(false);
        }

        let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let (Ok(toplevel), Ok(path)) = (Path::new(&toplevel).canonicalize(), path.canonicalize())
        else {
            return Ok(false);
        };

        if toplevel != path {
            debug!(
                toplevel = %toplevel.display(),
                "nested inside another repository"
            );
        }
        Ok(toplevel == path)
    }

    fn local_branch_exists(&self, path: &Path, name: &str) -> Result<bool, VcsError> {
        let reference = format!("refs/heads/{}", name);
        self.succeeds(path, &["rev-parse", "--verify", "--quiet", &reference])
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn ensure_initialized(&self, path: &Path) -> Result<(), VcsError> {
        if self.is_repository_root(path)? {
            debug!(path = %path.display(), "already a git repository");
            return Ok(());
        }

        self.run(path, &["init"])?;
        Ok(())
    }

    async fn stage_all(&self, path: &Path) -> Result<(), VcsError> {
        self.run(path, &["add", "."])?;
        Ok(())
    }

    async fn commit(&self, path: &Path, message: &str) -> Result<String, VcsError> {
        let status = self.run(path, &["status", "--porcelain"])?;
        if status.is_empty() {
            return Err(VcsError::new(
                VcsErrorKind::NothingToCommit,
                "nothing to commit, working tree clean",
            ));
        }

        self.run(path, &["commit", "-m", message])?;
        self.run(path, &["rev-parse", "HEAD"])
    }

    async fn create_branch(&self, path: &Path, name: &str) -> Result<(), VcsError> {
        if self.local_branch_exists(path, name)? {
            return Err(VcsError::new(
                VcsErrorKind::BranchExists,
                format!("a branch named '{}' already exists", name),
            ));
        }

        self.run(path, &["branch", name])?;
        Ok(())
    }

    async fn checkout(&self, path: &Path, name: &str) -> Result<(), VcsError> {
        self.run(path, &["checkout", name])?;
        Ok(())
    }

    async fn add_or_update_remote(&self, path: &Path, url: &str) -> Result<(), VcsError> {
        match self.remote_url(path).await? {
            Some(current) if current == url => {
                debug!(url, "origin already configured");
            }
            Some(_) => {
                self.run(path, &["remote", "set-url", REMOTE_NAME, url])?;
            }
            None => {
                self.run(path, &["remote", "add", REMOTE_NAME, url])?;
            }
        }
        Ok(())
    }

    async fn push(&self, path: &Path, branch: &str, set_upstream: bool) -> Result<(), VcsError> {
        // Fresh repositories may be on a differently named branch
        let refspec = if self.local_branch_exists(path, branch)? {
            branch.to_string()
        } else {
            format!("HEAD:refs/heads/{}", branch)
        };

        let mut args = vec!["push"];
        if set_upstream {
            args.push("--set-upstream");
        }
        args.push(REMOTE_NAME);
        args.push(&refspec);

        self.run(path, &args)?;
        Ok(())
    }

    async fn current_branch(&self, path: &Path) -> Result<String, VcsError> {
        let branch = self.run(path, &["branch", "--show-current"])?;
        if branch.is_empty() {
            return Err(VcsError::new(
                VcsErrorKind::CommandFailed,
                "HEAD is detached; check out a branch first",
            ));
        }
        Ok(branch)
    }

    async fn remote_url(&self, path: &Path) -> Result<Option<String>, VcsError> {
        let output = self.output(path, &["remote", "get-url", REMOTE_NAME])?;

        if output.status.success() {
            let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Ok((!url.is_empty()).then_some(url));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_not_a_repository(&stderr) {
            return Err(classify_failure(&["remote", "get-url"], &stderr));
        }
        Ok(None)
    }
}

fn spawn_error(program: &str, path: &Path, error: io::Error) -> VcsError {
    match error.kind() {
        io::ErrorKind::NotFound if path.is_dir() => VcsError::new(
            VcsErrorKind::CommandNotFound,
            format!("'{}' was not found on PATH", program),
        ),
        io::ErrorKind::NotFound => VcsError::new(
            VcsErrorKind::NotARepository,
            format!("directory does not exist: {}", path.display()),
        ),
        _ => VcsError::new(
            VcsErrorKind::CommandFailed,
            format!("failed to run {}: {}", program, error),
        ),
    }
}

fn is_not_a_repository(stderr: &str) -> bool {
    stderr.to_lowercase().contains("not a git repository")
}

fn classify_failure(args: &[&str], stderr: &str) -> VcsError {
    let message = stderr.trim();
    let lower = message.to_lowercase();
    let subcommand = args.first().copied().unwrap_or_default();

    let kind = if is_not_a_repository(&lower) {
        VcsErrorKind::NotARepository
    } else if subcommand == "push"
        && (lower.contains("rejected") || lower.contains("failed to push"))
    {
        VcsErrorKind::PushRejected
    } else if subcommand == "branch" && lower.contains("already exists") {
        VcsErrorKind::BranchExists
    } else {
        VcsErrorKind::CommandFailed
    };

    let message = if message.is_empty() {
        format!("git {} failed", args.join(" "))
    } else {
        message.to_string()
    };

    VcsError::new(kind, message)
}
