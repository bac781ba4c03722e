//! The fixed operation sequence behind each action
//!
//! | Action   | Steps |
//! |----------|-------|
//! | `create` | create repository, then (only when pushing) ensure initialized, stage, commit unless clean, configure origin, push |
//! | `push`   | verify repository, ensure initialized, stage, commit unless clean, configure origin, push |
//! | `commit` | stage, commit, push |
//! | `branch` | create branch, check out, push with upstream |
//! | `pr`     | current branch, open pull request |

use super::action::Action;
use super::step::{BranchTarget, Operation, OperationStep};
use crate::config::EffectiveConfig;
use crate::constants;

/// Compute the ordered steps for `action` under `config`
pub fn plan(action: &Action, config: &EffectiveConfig) -> Vec<OperationStep> {
    let repo_name = config.repo_name.clone().unwrap_or_default();

    let operations = match action {
        Action::Create => {
            let mut ops = vec![Operation::CreateRepository {
                name: repo_name,
                description: config.description.clone().unwrap_or_default(),
                visibility: config.visibility,
                // A host-generated README commit would collide with the pushed history
                auto_init: !config.push_after_create,
            }];
            if config.push_after_create {
                ops.extend(publish_local_tree(config));
            }
            ops
        }
        Action::Push => {
            let mut ops = vec![Operation::VerifyRepository { name: repo_name }];
            ops.extend(publish_local_tree(config));
            ops
        }
        Action::Commit { message, branch } => vec![
            Operation::StageAll,
            Operation::Commit {
                message: message.clone(),
                skip_if_clean: false,
            },
            Operation::Push {
                branch: branch
                    .clone()
                    .map_or(BranchTarget::Current, BranchTarget::Named),
                set_upstream: false,
            },
        ],
        Action::Branch { name } => vec![
            Operation::CreateBranch { name: name.clone() },
            Operation::Checkout { name: name.clone() },
            Operation::Push {
                branch: BranchTarget::Named(name.clone()),
                set_upstream: true,
            },
        ],
        Action::PullRequest {
            title,
            body,
            base,
            draft,
        } => vec![
            Operation::CurrentBranch,
            Operation::CreatePullRequest {
                title: title.clone(),
                body: body.clone(),
                base: base.clone(),
                draft: *draft,
            },
        ],
    };

    operations.into_iter().map(OperationStep::new).collect()
}

/// Shared tail of `create` and `push`
fn publish_local_tree(config: &EffectiveConfig) -> Vec<Operation> {
    vec![
        Operation::EnsureInitialized,
        Operation::StageAll,
        Operation::Commit {
            message: constants::git::INITIAL_COMMIT_MSG.to_string(),
            skip_if_clean: true,
        },
        Operation::AddOrUpdateRemote,
        Operation::Push {
            branch: BranchTarget::Named(config.branch.clone()),
            set_upstream: true,
        },
    ]
}
