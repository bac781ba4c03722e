//! gitflow - create GitHub repositories, push, commit, branch and open pull
//! requests from one command

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod host;
pub mod report;
pub mod utils;
pub mod vcs;
pub mod workflow;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use config::{EffectiveConfig, OutputMode};
pub use errors::ErrorKind;
pub use workflow::{Action, Outcome, OutcomeStatus, execute};
