//! Workflow orchestration
//!
//! - [`action`]: the closed set of workflows
//! - [`step`]: operation steps and their results
//! - [`plan`]: the fixed per-action step table
//! - [`orchestrator`]: sequential execution with partial-failure reporting
//! - [`outcome`]: the final report handed to the reporter

pub mod action;
pub mod orchestrator;
pub mod outcome;
pub mod plan;
pub mod step;

pub use action::{Action, ActionKind};
pub use orchestrator::{Orchestrator, execute};
pub use outcome::{Outcome, OutcomeStatus, StepError};
pub use plan::plan;
pub use step::{
    BranchTarget, Operation, OperationStep, StepDetails, StepEffect, StepKind, StepResult,
};
