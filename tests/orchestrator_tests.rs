//! Workflow orchestration against scripted collaborators

mod support;

use gitflow::errors::{ErrorKind, HostErrorKind, VcsErrorKind};
use gitflow::workflow::{Action, Orchestrator, OutcomeStatus, StepDetails, StepResult, execute};
use support::{CallLog, FakeHost, FakeVcs, config};
use tokio_util::sync::CancellationToken;

fn pr(base: &str) -> Action {
    Action::PullRequest {
        title: None,
        body: String::new(),
        base: base.to_string(),
        draft: false,
    }
}

#[tokio::test]
async fn test_create_without_push_is_a_single_step() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let host = FakeHost::new(&log);
    let mut config = config("/work");
    config.push_after_create = false;

    let outcome = execute(&Action::Create, &config, &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.completed_steps.len(), 1);
    assert_eq!(outcome.branch, None);
    assert_eq!(outcome.repository.as_deref(), Some("octo/demo"));
    assert_eq!(
        log.calls(),
        vec!["host.create_repository(demo, private=false, auto_init=true)"]
    );
}

#[tokio::test]
async fn test_create_and_push_runs_full_pipeline_in_order() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let host = FakeHost::new(&log);

    let outcome = execute(&Action::Create, &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.branch.as_deref(), Some("main"));
    assert_eq!(
        outcome.repository_url.as_deref(),
        Some("https://github.com/octo/demo")
    );
    assert_eq!(
        log.calls(),
        vec![
            "host.create_repository(demo, private=false, auto_init=false)",
            "vcs.ensure_initialized",
            "vcs.stage_all",
            "vcs.commit(Initial commit)",
            "vcs.add_or_update_remote(https://github.com/octo/demo.git)",
            "vcs.push(main, true)",
        ]
    );
    assert!(outcome.committed());
}

#[tokio::test]
async fn test_create_then_push_rejected_is_partial_success() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).failing("push", VcsErrorKind::PushRejected);
    let host = FakeHost::new(&log);

    let outcome = execute(&Action::Create, &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::PartialSuccess);
    assert_eq!(outcome.completed_steps.len(), 5);
    assert!(outcome.completed_steps.iter().all(StepResult::is_success));
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, ErrorKind::PushRejected);
    assert_eq!(outcome.errors[0].step.as_deref(), Some("Push branch 'main'"));
    // The created repository is still reported so the caller does not create it again
    assert_eq!(outcome.repository.as_deref(), Some("octo/demo"));
}

#[tokio::test]
async fn test_create_name_taken_touches_nothing_local() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let host = FakeHost::new(&log).failing("create_repository", HostErrorKind::AlreadyExists);

    let outcome = execute(&Action::Create, &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert!(outcome.completed_steps.is_empty());
    assert_eq!(outcome.errors[0].kind, ErrorKind::AlreadyExists);
    assert_eq!(log.calls().len(), 1);
}

#[tokio::test]
async fn test_failing_step_leaves_exactly_the_earlier_steps() {
    let operations = [
        "ensure_initialized",
        "stage_all",
        "add_or_update_remote",
        "push",
    ];

    for operation in operations {
        let log = CallLog::default();
        let vcs = FakeVcs::new(&log).failing(operation, VcsErrorKind::CommandFailed);
        let host = FakeHost::new(&log);

        let outcome = execute(&Action::Create, &config("/work"), &vcs, Some(&host)).await;

        let calls = log.calls();
        assert_eq!(
            outcome.completed_steps.len(),
            calls.len() - 1,
            "failing {}",
            operation
        );
        // The created repository always precedes the failure
        assert_eq!(outcome.status, OutcomeStatus::PartialSuccess);
        assert_eq!(outcome.errors[0].kind, ErrorKind::CommandFailed);
    }
}

#[tokio::test]
async fn test_push_to_missing_repository_fails_before_local_steps() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let host = FakeHost::new(&log).failing("verify_repository_exists", HostErrorKind::NotFound);

    let outcome = execute(&Action::Push, &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::NotFound);
    assert_eq!(log.calls(), vec!["host.verify_repository_exists(demo)"]);
}

#[tokio::test]
async fn test_push_on_clean_tree_skips_commit() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).failing("commit", VcsErrorKind::NothingToCommit);
    let host = FakeHost::new(&log);

    let outcome = execute(&Action::Push, &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert!(!outcome.committed());
    assert!(outcome.completed_steps.iter().any(|result| matches!(
        result,
        StepResult::Success {
            details: StepDetails::CommitSkipped,
            ..
        }
    )));
    assert_eq!(log.calls().last().map(String::as_str), Some("vcs.push(main, true)"));
}

#[tokio::test]
async fn test_commit_on_clean_tree_is_failure() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).failing("commit", VcsErrorKind::NothingToCommit);
    let action = Action::Commit {
        message: "wip".into(),
        branch: None,
    };

    let outcome = execute(&action, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, ErrorKind::NothingToCommit);
    assert!(!log.calls().iter().any(|call| call.starts_with("vcs.push")));
}

#[tokio::test]
async fn test_commit_pushes_current_branch_without_host() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log)
        .on_branch("feature-x")
        .with_remote("git@github.com:octo/demo.git");
    let action = Action::Commit {
        message: "wip".into(),
        branch: None,
    };

    let outcome = execute(&action, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.branch.as_deref(), Some("feature-x"));
    assert_eq!(outcome.repository.as_deref(), Some("octo/demo"));
    assert_eq!(
        log.calls(),
        vec![
            "vcs.stage_all",
            "vcs.commit(wip)",
            "vcs.current_branch",
            "vcs.push(feature-x, false)",
            "vcs.remote_url",
        ]
    );
}

#[tokio::test]
async fn test_commit_push_rejected_after_commit_is_partial() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).failing("push", VcsErrorKind::PushRejected);
    let action = Action::Commit {
        message: "wip".into(),
        branch: Some("release".into()),
    };

    let outcome = execute(&action, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::PartialSuccess);
    assert_eq!(outcome.completed_steps.len(), 2);
    assert_eq!(outcome.branch.as_deref(), Some("release"));
}

#[tokio::test]
async fn test_existing_branch_stops_before_checkout() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).failing("create_branch", VcsErrorKind::BranchExists);
    let action = Action::Branch {
        name: "feature".into(),
    };

    let outcome = execute(&action, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert!(outcome.completed_steps.is_empty());
    assert_eq!(outcome.errors[0].kind, ErrorKind::BranchExists);
    assert_eq!(log.calls(), vec!["vcs.create_branch(feature)"]);
}

#[tokio::test]
async fn test_branch_reports_tree_url() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).with_remote("https://github.com/octo/demo.git");
    let action = Action::Branch {
        name: "feature".into(),
    };

    let outcome = execute(&action, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(
        outcome.repository_url.as_deref(),
        Some("https://github.com/octo/demo/tree/feature")
    );
    assert!(log.calls().contains(&"vcs.push(feature, true)".to_string()));
}

#[tokio::test]
async fn test_pr_opens_from_current_branch() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).on_branch("add-login_page");
    let host = FakeHost::new(&log);

    let outcome = execute(&pr("main"), &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.pull_request_number(), Some(7));
    assert_eq!(
        outcome.repository_url.as_deref(),
        Some("https://github.com/octo/demo/pull/7")
    );

    let requests = host.pull_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].head, "add-login_page");
    assert_eq!(requests[0].base, "main");
    assert_eq!(requests[0].title, "Add Login Page");
}

#[tokio::test]
async fn test_pr_without_changes_is_distinct_from_auth_failure() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).on_branch("feature");

    let host = FakeHost::new(&log).failing("create_pull_request", HostErrorKind::NoCommitsBetween);
    let outcome = execute(&pr("main"), &config("/work"), &vcs, Some(&host)).await;
    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::NoCommitsBetween);

    let host = FakeHost::new(&log).failing("create_pull_request", HostErrorKind::AuthFailed);
    let outcome = execute(&pr("main"), &config("/work"), &vcs, Some(&host)).await;
    assert_eq!(outcome.errors[0].kind, ErrorKind::AuthFailed);
}

#[tokio::test]
async fn test_pr_from_base_branch_is_rejected_locally() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).on_branch("main");
    let host = FakeHost::new(&log);

    let outcome = execute(&pr("main"), &config("/work"), &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::InvalidBranch);
    assert!(host.pull_requests().is_empty());
}

#[tokio::test]
async fn test_pr_repository_from_origin() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log)
        .on_branch("feature")
        .with_remote("git@github.com:someone/other.git");
    let host = FakeHost::new(&log);
    let mut config = config("/work");
    config.repo_name = None;

    let outcome = execute(&pr("main"), &config, &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(host.pull_requests()[0].repository, "someone/other");
    assert_eq!(outcome.repository.as_deref(), Some("someone/other"));
}

#[tokio::test]
async fn test_pr_without_repository_or_remote() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log).on_branch("feature");
    let host = FakeHost::new(&log);
    let mut config = config("/work");
    config.repo_name = None;

    let outcome = execute(&pr("main"), &config, &vcs, Some(&host)).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::NoRemote);
}

#[tokio::test]
async fn test_remote_step_without_host_is_missing_token() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);

    let outcome = execute(&Action::Push, &config("/work"), &vcs, None).await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::MissingToken);
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_before_first_step() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let host = FakeHost::new(&log);
    let token = CancellationToken::new();
    token.cancel();

    let outcome = Orchestrator::new(&vcs, Some(&host))
        .with_cancellation(token)
        .run(&Action::Create, &config("/work"))
        .await;

    assert_eq!(outcome.status, OutcomeStatus::Failure);
    assert_eq!(outcome.errors[0].kind, ErrorKind::Cancelled);
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_interrupted_after_create_is_partial() {
    let log = CallLog::default();
    let vcs = FakeVcs::new(&log);
    let token = CancellationToken::new();
    let host = FakeHost::new(&log).cancelling_after_create(token.clone());

    let outcome = Orchestrator::new(&vcs, Some(&host))
        .with_cancellation(token)
        .run(&Action::Create, &config("/work"))
        .await;

    // The create that was in flight finishes; nothing after it starts
    assert_eq!(outcome.status, OutcomeStatus::PartialSuccess);
    assert_eq!(outcome.completed_steps.len(), 1);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, ErrorKind::Cancelled);
    assert_eq!(
        outcome.errors[0].step.as_deref(),
        Some("Initialize local repository")
    );
    assert_eq!(
        log.calls(),
        vec!["host.create_repository(demo, private=false, auto_init=false)"]
    );
}
