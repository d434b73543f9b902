mod common;

use aigito::engine::{CommitEngine, GroupOutcome};
use aigito::{Error, RunConfig};
use common::{group, test_author, Call, FakeRepo, ScriptedInteraction};

fn three_groups() -> Vec<aigito::CommitGroup> {
    vec![
        group(&["a.rs"], "fix(a): adjust parsing"),
        group(&["b.rs", "c.rs"], "refactor(b): update helpers"),
        group(&["d.rs"], "chore: update config"),
    ]
}

#[test]
fn test_dry_run_with_auto_approve_never_touches_the_repository() {
    let repo = FakeRepo::new();
    let author = test_author();
    let config = RunConfig {
        auto_approve: true,
        dry_run: true,
        verbose: false,
    };
    let mut interaction = ScriptedInteraction::default();

    let summary = CommitEngine::new(&repo, &author, config)
        .apply(&three_groups(), &mut interaction)
        .expect("dry run should succeed");

    assert!(repo.calls().is_empty());
    assert_eq!(summary.outcomes, vec![GroupOutcome::WouldCommit; 3]);
    assert_eq!(summary.would_commit(), 3);
    assert_eq!(interaction.shown, vec![0, 1, 2]);
    assert!(interaction.questions.is_empty());
}

#[test]
fn test_interactive_failure_stops_the_run() {
    let mut repo = FakeRepo::new();
    repo.failing_commits.insert(2);
    let author = test_author();
    let mut interaction = ScriptedInteraction::answering(&[true, true, true]);

    let err = CommitEngine::new(&repo, &author, RunConfig::default())
        .apply(&three_groups(), &mut interaction)
        .expect_err("second group should fail the run");

    assert!(matches!(err, Error::GroupCommitError { group: 2, .. }));
    assert_eq!(
        repo.calls(),
        vec![
            Call::Stage(vec!["a.rs".to_string()]),
            Call::Commit("fix(a): adjust parsing".to_string()),
            Call::Stage(vec!["b.rs".to_string(), "c.rs".to_string()]),
            Call::Commit("refactor(b): update helpers".to_string()),
            Call::Unstage(vec!["b.rs".to_string(), "c.rs".to_string()]),
        ]
    );
    assert_eq!(interaction.shown, vec![0, 1]);
}

#[test]
fn test_auto_approve_failure_continues_with_next_group() {
    let mut repo = FakeRepo::new();
    repo.failing_commits.insert(2);
    let author = test_author();
    let config = RunConfig {
        auto_approve: true,
        ..RunConfig::default()
    };
    let mut interaction = ScriptedInteraction::default();

    let summary = CommitEngine::new(&repo, &author, config)
        .apply(&three_groups(), &mut interaction)
        .expect("auto-approve keeps going");

    assert_eq!(summary.committed(), 2);
    assert_eq!(summary.failed(), 1);
    assert!(matches!(summary.outcomes[1], GroupOutcome::Failed(_)));
    assert_eq!(
        repo.calls(),
        vec![
            Call::Stage(vec!["a.rs".to_string()]),
            Call::Commit("fix(a): adjust parsing".to_string()),
            Call::Stage(vec!["b.rs".to_string(), "c.rs".to_string()]),
            Call::Commit("refactor(b): update helpers".to_string()),
            Call::Unstage(vec!["b.rs".to_string(), "c.rs".to_string()]),
            Call::Stage(vec!["d.rs".to_string()]),
            Call::Commit("chore: update config".to_string()),
        ]
    );
}

#[test]
fn test_auto_approve_stage_failure_skips_commit_and_continues() {
    let mut repo = FakeRepo::new();
    repo.failing_stages.insert(1);
    let author = test_author();
    let config = RunConfig {
        auto_approve: true,
        ..RunConfig::default()
    };

    let summary = CommitEngine::new(&repo, &author, config)
        .apply(&three_groups(), &mut ScriptedInteraction::default())
        .expect("auto-approve keeps going");

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.committed(), 2);
    let calls = repo.calls();
    assert_eq!(calls[0], Call::Stage(vec!["a.rs".to_string()]));
    assert_eq!(calls[1], Call::Unstage(vec!["a.rs".to_string()]));
    assert!(!calls.contains(&Call::Commit("fix(a): adjust parsing".to_string())));
    assert_eq!(
        calls.last(),
        Some(&Call::Commit("chore: update config".to_string()))
    );
}

#[test]
fn test_interactive_stage_failure_is_fatal_without_commit() {
    let mut repo = FakeRepo::new();
    repo.failing_stages.insert(1);
    let author = test_author();
    let mut interaction = ScriptedInteraction::answering(&[true, true, true]);

    let err = CommitEngine::new(&repo, &author, RunConfig::default())
        .apply(&three_groups(), &mut interaction)
        .expect_err("first group should fail the run");

    assert!(matches!(err, Error::GroupCommitError { group: 1, .. }));
    assert_eq!(
        repo.calls(),
        vec![
            Call::Stage(vec!["a.rs".to_string()]),
            Call::Unstage(vec!["a.rs".to_string()]),
        ]
    );
    assert_eq!(interaction.questions.len(), 1);
}

#[test]
fn test_declined_groups_are_skipped() {
    let repo = FakeRepo::new();
    let author = test_author();
    let mut interaction = ScriptedInteraction::answering(&[false, true, false]);

    let summary = CommitEngine::new(&repo, &author, RunConfig::default())
        .apply(&three_groups(), &mut interaction)
        .expect("skips are not failures");

    assert_eq!(
        summary.outcomes,
        vec![
            GroupOutcome::Skipped,
            GroupOutcome::Committed,
            GroupOutcome::Skipped
        ]
    );
    assert_eq!(
        repo.calls(),
        vec![
            Call::Stage(vec!["b.rs".to_string(), "c.rs".to_string()]),
            Call::Commit("refactor(b): update helpers".to_string()),
        ]
    );
    assert_eq!(interaction.questions.len(), 3);
}

#[test]
fn test_interactive_dry_run_still_asks() {
    let repo = FakeRepo::new();
    let author = test_author();
    let config = RunConfig {
        dry_run: true,
        ..RunConfig::default()
    };
    let mut interaction = ScriptedInteraction::answering(&[true, false, true]);

    let summary = CommitEngine::new(&repo, &author, config)
        .apply(&three_groups(), &mut interaction)
        .expect("dry run should succeed");

    assert!(repo.calls().is_empty());
    assert_eq!(summary.would_commit(), 2);
    assert_eq!(summary.skipped(), 1);
}

#[test]
fn test_unanswerable_prompt_is_fatal() {
    let repo = FakeRepo::new();
    let author = test_author();
    let mut interaction = ScriptedInteraction::answering(&[true]);

    let result =
        CommitEngine::new(&repo, &author, RunConfig::default()).apply(&three_groups(), &mut interaction);

    assert!(matches!(result, Err(Error::IoError(_))));
    assert_eq!(repo.calls().len(), 2);
}
