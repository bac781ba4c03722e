//! Machine-readable rendering
//!
//! Every record carries the same keys whatever the action or status:
//! `action`, `status`, `message`, `branch`, `repository`, `url`,
//! `pull_request`, `steps` and `errors`. Absent strings are `""`, an absent
//! pull request number is `null`.

use super::summary;
use crate::errors::{ConfigError, ErrorKind};
use crate::workflow::{ActionKind, Outcome, StepDetails, StepEffect, StepError, StepKind, StepResult};
use serde_json::{Value, json};

pub fn outcome_record(outcome: &Outcome) -> Value {
    json!({
        "action": outcome.action.as_str(),
        "status": outcome.status.as_str(),
        "message": summary(outcome),
        "branch": outcome.branch.as_deref().unwrap_or_default(),
        "repository": outcome.repository.as_deref().unwrap_or_default(),
        "url": outcome.repository_url.as_deref().unwrap_or_default(),
        "pull_request": outcome.pull_request_number(),
        "steps": outcome.completed_steps.iter().map(step_record).collect::<Vec<_>>(),
        "errors": outcome.errors.iter().map(error_record).collect::<Vec<_>>(),
    })
}

pub fn config_error_record(action: ActionKind, error: &ConfigError) -> Value {
    let kind = error.kind();
    json!({
        "action": action.as_str(),
        "status": "failure",
        "message": kind.sentence(),
        "branch": "",
        "repository": "",
        "url": "",
        "pull_request": Value::Null,
        "steps": [],
        "errors": [entry(kind, None, &error.to_string())],
    })
}

fn step_record(result: &StepResult) -> Value {
    let step = result.step();
    let (outcome, detail) = match result {
        StepResult::Success { details, .. } => match details {
            StepDetails::CommitSkipped => ("skipped", String::new()),
            other => ("done", step_detail(other)),
        },
        StepResult::Failure { message, .. } => ("failed", message.clone()),
    };

    json!({
        "description": step.description,
        "kind": match step.kind() {
            StepKind::Local => "local",
            StepKind::Remote => "remote",
        },
        "effect": match result.effect() {
            Some(StepEffect::ReadOnly) => "read_only",
            Some(StepEffect::Idempotent) => "idempotent",
            Some(StepEffect::Persistent) => "persistent",
            None => "",
        },
        "result": outcome,
        "detail": detail,
    })
}

fn step_detail(details: &StepDetails) -> String {
    match details {
        StepDetails::Done | StepDetails::CommitSkipped => String::new(),
        StepDetails::Repository { url, .. } => url.clone(),
        StepDetails::Committed { sha } => sha.clone(),
        StepDetails::Pushed { branch } | StepDetails::Branch { name: branch } => branch.clone(),
        StepDetails::PullRequest { url, .. } => url.clone(),
    }
}

fn error_record(error: &StepError) -> Value {
    entry(error.kind, error.step.as_deref(), &error.message)
}

fn entry(kind: ErrorKind, step: Option<&str>, detail: &str) -> Value {
    json!({
        "kind": kind.as_str(),
        "step": step.unwrap_or_default(),
        "message": kind.sentence(),
        "detail": detail,
    })
}
