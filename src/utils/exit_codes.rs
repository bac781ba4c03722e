//! Process exit codes

use crate::workflow::OutcomeStatus;

pub const SUCCESS: i32 = 0;
/// The workflow failed before leaving any lasting change
pub const FAILURE: i32 = 1;
/// Reserved for command-line usage errors reported by clap
pub const USAGE: i32 = 2;
/// Some steps took effect before a later one failed
pub const PARTIAL_SUCCESS: i32 = 3;
/// Configuration could not be resolved; nothing was attempted
pub const CONFIG_ERROR: i32 = 4;
/// Terminated by a second Control-C
pub const INTERRUPTED: i32 = 130;

pub fn exit_code_for(status: OutcomeStatus) -> i32 {
    match status {
        OutcomeStatus::Success => SUCCESS,
        OutcomeStatus::PartialSuccess => PARTIAL_SUCCESS,
        OutcomeStatus::Failure => FAILURE,
    }
}

/// Get a human-readable description for an exit code
pub fn get_exit_code_description(exit_code: i32) -> &'static str {
    match exit_code {
        SUCCESS => "success",
        FAILURE => "failure",
        USAGE => "usage error",
        PARTIAL_SUCCESS => "partial success",
        CONFIG_ERROR => "configuration error",
        INTERRUPTED => "terminated by Control-C",
        _ => "error",
    }
}
