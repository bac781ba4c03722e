//! Central constants for the gitflow application

/// Default values for Git operations
pub mod git {
    /// Branch pushed by `create` and `push` when none is configured
    pub const DEFAULT_BRANCH: &str = "main";

    /// Commit message used when `create` or `push` finds uncommitted work
    pub const INITIAL_COMMIT_MSG: &str = "Initial commit";

    /// The single remote gitflow manages
    pub const REMOTE_NAME: &str = "origin";
}

/// Default values for GitHub operations
pub mod github {
    /// Base branch for pull requests when `--base` is not given
    pub const DEFAULT_BASE_BRANCH: &str = "main";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name, looked up in the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "gitflow.yaml";
}

/// Environment variables consulted by the configuration resolver
pub mod env {
    pub const TOKEN: &str = "GITHUB_TOKEN";
    pub const REPO_NAME: &str = "GITFLOW_REPO_NAME";
    pub const DESCRIPTION: &str = "GITFLOW_DESCRIPTION";
    pub const PRIVATE: &str = "GITFLOW_PRIVATE";
    pub const PUSH: &str = "GITFLOW_PUSH";
    pub const PATH: &str = "GITFLOW_PATH";
    pub const BRANCH: &str = "GITFLOW_BRANCH";
    pub const OUTPUT: &str = "GITFLOW_OUTPUT";

    /// Every variable the resolver reads; nothing else is captured
    pub const ALL: &[&str] = &[
        TOKEN,
        REPO_NAME,
        DESCRIPTION,
        PRIVATE,
        PUSH,
        PATH,
        BRANCH,
        OUTPUT,
    ];
}
