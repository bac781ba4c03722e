//! Console progress lines

use crate::workflow::ActionKind;
use colored::*;

/// Prints `<action> | message` lines while a workflow runs
///
/// A disabled logger prints nothing, which keeps stdout a single JSON
/// document in JSON mode.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    enabled: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Logger {
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn success(&self, action: ActionKind, msg: &str) {
        if self.enabled {
            println!("{} | {}", action.as_str().cyan().bold(), msg.green());
        }
    }

    pub fn warn(&self, action: ActionKind, msg: &str) {
        if self.enabled {
            println!("{} | {}", action.as_str().cyan().bold(), msg.yellow());
        }
    }

    pub fn error(&self, action: ActionKind, msg: &str) {
        if self.enabled {
            eprintln!("{} | {}", action.as_str().cyan().bold(), msg.red());
        }
    }
}
