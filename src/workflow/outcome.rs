//! The orchestrator's final report for one invocation

use super::action::ActionKind;
use super::step::{StepDetails, StepEffect, StepResult};
use crate::errors::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// A later step failed after an earlier one left a lasting side effect
    PartialSuccess,
    Failure,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::PartialSuccess => "partial_success",
            OutcomeStatus::Failure => "failure",
        }
    }
}

/// An error as reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    /// Description of the step that failed, if the failure belongs to one
    pub step: Option<String>,
    pub kind: ErrorKind,
    /// Underlying message from the collaborator
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: ActionKind,
    pub status: OutcomeStatus,
    /// Successful steps in execution order
    pub completed_steps: Vec<StepResult>,
    pub repository: Option<String>,
    pub repository_url: Option<String>,
    pub branch: Option<String>,
    pub errors: Vec<StepError>,
}

impl Outcome {
    /// Classify a run that stopped with `errors` after `completed_steps`
    pub fn status_for(completed_steps: &[StepResult], failed: bool) -> OutcomeStatus {
        if !failed {
            return OutcomeStatus::Success;
        }

        let persisted = completed_steps
            .iter()
            .any(|result| result.effect() == Some(StepEffect::Persistent));

        if persisted {
            OutcomeStatus::PartialSuccess
        } else {
            OutcomeStatus::Failure
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// First error, which is the one that stopped the pipeline
    pub fn primary_error(&self) -> Option<&StepError> {
        self.errors.first()
    }

    /// Number of the opened pull request, when the run opened one
    pub fn pull_request_number(&self) -> Option<u64> {
        self.completed_steps.iter().find_map(|result| match result {
            StepResult::Success {
                details: StepDetails::PullRequest { number, .. },
                ..
            } => Some(*number),
            _ => None,
        })
    }

    /// Whether a commit step actually created a commit
    pub fn committed(&self) -> bool {
        self.completed_steps.iter().any(|result| {
            matches!(
                result,
                StepResult::Success {
                    details: StepDetails::Committed { .. },
                    ..
                }
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{Operation, OperationStep};

    fn done(operation: Operation, effect: StepEffect) -> StepResult {
        StepResult::Success {
            step: OperationStep::new(operation),
            details: StepDetails::Done,
            effect,
        }
    }

    #[test]
    fn test_status_without_failure() {
        assert_eq!(Outcome::status_for(&[], false), OutcomeStatus::Success);
    }

    #[test]
    fn test_failure_after_only_safe_steps() {
        let completed = [
            done(Operation::CurrentBranch, StepEffect::ReadOnly),
            done(Operation::StageAll, StepEffect::Idempotent),
        ];
        assert_eq!(Outcome::status_for(&completed, true), OutcomeStatus::Failure);
        assert_eq!(Outcome::status_for(&[], true), OutcomeStatus::Failure);
    }

    #[test]
    fn test_failure_after_lasting_change() {
        let completed = [
            done(Operation::StageAll, StepEffect::Idempotent),
            done(
                Operation::CreateBranch {
                    name: "feature".into(),
                },
                StepEffect::Persistent,
            ),
        ];
        assert_eq!(
            Outcome::status_for(&completed, true),
            OutcomeStatus::PartialSuccess
        );
    }
}
