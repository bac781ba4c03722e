//! Result Reporter
//!
//! Turns an [`Outcome`] into exactly one block of output plus the process
//! exit code. JSON mode emits a single pretty-printed object with a fixed
//! key set; human mode emits a short narrative. The token never reaches
//! either renderer.

pub mod human;
pub mod json;
pub mod logger;

pub use logger::Logger;

use crate::config::OutputMode;
use crate::errors::ConfigError;
use crate::utils::exit_codes::{CONFIG_ERROR, exit_code_for};
use crate::workflow::{ActionKind, Outcome, OutcomeStatus, StepDetails, StepResult};

/// Rendered output and the exit code that goes with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub exit_code: i32,
}

pub fn render(outcome: &Outcome, mode: OutputMode) -> Rendered {
    let text = match mode {
        OutputMode::Json => format!("{:#}", json::outcome_record(outcome)),
        OutputMode::Human => human::outcome_text(outcome),
    };

    Rendered {
        text,
        exit_code: exit_code_for(outcome.status),
    }
}

/// Render a failure that happened before any step ran
pub fn render_config_error(action: ActionKind, error: &ConfigError, mode: OutputMode) -> Rendered {
    let text = match mode {
        OutputMode::Json => format!("{:#}", json::config_error_record(action, error)),
        OutputMode::Human => human::config_error_text(action, error),
    };

    Rendered {
        text,
        exit_code: CONFIG_ERROR,
    }
}

/// One-line description of what happened
pub(crate) fn summary(outcome: &Outcome) -> String {
    match outcome.status {
        OutcomeStatus::Success => success_summary(outcome),
        OutcomeStatus::PartialSuccess => match outcome.primary_error() {
            Some(error) => format!("Partially completed: {}", error.kind.sentence()),
            None => "Partially completed".to_string(),
        },
        OutcomeStatus::Failure => match outcome.primary_error() {
            Some(error) => error.kind.sentence().to_string(),
            None => "Failed".to_string(),
        },
    }
}

fn success_summary(outcome: &Outcome) -> String {
    let repository = outcome.repository.as_deref().unwrap_or("repository");
    let branch = outcome.branch.as_deref().unwrap_or_default();

    match outcome.action {
        ActionKind::Create if outcome.branch.is_some() => {
            format!("Created {} and pushed '{}'", repository, branch)
        }
        ActionKind::Create => format!("Created {}", repository),
        ActionKind::Push => format!("Pushed '{}' to {}", branch, repository),
        ActionKind::Commit => {
            let sha = outcome.completed_steps.iter().find_map(|result| match result {
                StepResult::Success {
                    details: StepDetails::Committed { sha },
                    ..
                } => Some(sha.as_str()),
                _ => None,
            });
            match sha {
                Some(sha) => format!(
                    "Committed {} and pushed '{}'",
                    &sha[..sha.len().min(7)],
                    branch
                ),
                None => format!("Committed and pushed '{}'", branch),
            }
        }
        ActionKind::Branch => format!("Created and pushed branch '{}'", branch),
        ActionKind::PullRequest => match outcome.pull_request_number() {
            Some(number) => format!("Opened pull request #{} on {}", number, repository),
            None => format!("Opened pull request on {}", repository),
        },
    }
}
