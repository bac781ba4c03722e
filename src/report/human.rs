//! Human-readable rendering

use super::summary;
use crate::errors::ConfigError;
use crate::workflow::{ActionKind, Outcome, OutcomeStatus, StepError};
use colored::*;

pub fn outcome_text(outcome: &Outcome) -> String {
    let prefix = outcome.action.as_str().cyan().bold().to_string();
    let mut lines = Vec::new();

    let headline = summary(outcome);
    lines.push(match outcome.status {
        OutcomeStatus::Success => format!("{} | {} {}", prefix, "✓".green(), headline.green()),
        OutcomeStatus::PartialSuccess => {
            format!("{} | {} {}", prefix, "!".yellow(), headline.yellow())
        }
        OutcomeStatus::Failure => format!("{} | {} {}", prefix, "✗".red(), headline.red()),
    });

    if let Some(repository) = &outcome.repository {
        lines.push(format!("{} |   repository: {}", prefix, repository));
    }
    if let Some(url) = &outcome.repository_url {
        lines.push(format!("{} |   url: {}", prefix, url));
    }
    if let Some(branch) = &outcome.branch {
        lines.push(format!("{} |   branch: {}", prefix, branch));
    }

    for error in &outcome.errors {
        lines.extend(error_lines(&prefix, error));
    }

    if outcome.status == OutcomeStatus::PartialSuccess {
        let done = outcome
            .completed_steps
            .iter()
            .map(|result| result.step().description.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{} |   already done: {}", prefix, done));
    }

    if let Some(error) = outcome.primary_error()
        && error.kind.is_retryable()
    {
        lines.push(format!("{} |   this may succeed if you run it again later", prefix));
    }

    lines.join("\n")
}

pub fn config_error_text(action: ActionKind, error: &ConfigError) -> String {
    let prefix = action.as_str().cyan().bold().to_string();
    format!(
        "{} | {} {}\n{} |   {}",
        prefix,
        "✗".red(),
        error.kind().sentence().red(),
        prefix,
        error
    )
}

fn error_lines(prefix: &str, error: &StepError) -> Vec<String> {
    let mut lines = vec![format!("{} |   {}", prefix, error.kind.sentence().red())];
    if let Some(step) = &error.step {
        lines.push(format!("{} |   failed step: {}", prefix, step));
    }
    if !error.message.is_empty() {
        lines.push(format!("{} |   detail: {}", prefix, error.message));
    }
    lines
}
