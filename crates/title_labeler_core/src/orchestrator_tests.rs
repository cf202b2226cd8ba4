//! Tests for the orchestrator module.

use super::*;
use crate::errors::{ApplyStep, ContextError, LabelerError};
use crate::test_support::{Call, RecordingLabelClient, RecordingReporter};
use serde_json::json;

const REPOSITORY: Option<&str> = Some("acme/widgets");

fn issue(number: u64, title: &str) -> EventPayload {
    serde_json::from_value(json!({ "issue": { "number": number, "title": title } }))
        .expect("Failed to build payload")
}

fn pull_request(number: u64, title: &str) -> EventPayload {
    serde_json::from_value(json!({ "pull_request": { "number": number, "title": title } }))
        .expect("Failed to build payload")
}

#[tokio::test]
async fn test_question_issue_creates_and_adds_help_label() {
    let client = RecordingLabelClient::new().with_repository_labels(&["Type: Bug"]);
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let outcome = labeler
        .run(&issue(21, "[Question] how do I configure X"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(
        outcome,
        RunOutcome::Labeled {
            kind: ItemKind::Issue,
            number: 21,
            label: TypeLabel::Help,
            label_created: true,
        }
    );

    let calls = client.calls();
    let creates: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::CreateLabel { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    let adds: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::AddLabels { number, labels } => Some((*number, labels.clone())),
            _ => None,
        })
        .collect();

    assert_eq!(creates, vec!["Type: Help"]);
    assert_eq!(adds, vec![(21, vec!["Type: Help".to_string()])]);

    let create_index = calls
        .iter()
        .position(|c| matches!(c, Call::CreateLabel { .. }))
        .unwrap();
    let add_index = calls
        .iter()
        .position(|c| matches!(c, Call::AddLabels { .. }))
        .unwrap();
    assert!(create_index < add_index);

    assert_eq!(reporter.output(OUTPUT_OUTCOME).as_deref(), Some("labeled"));
    assert_eq!(reporter.output(OUTPUT_LABEL).as_deref(), Some("Type: Help"));
    assert_eq!(
        reporter.output(OUTPUT_MESSAGE).as_deref(),
        Some("Created label Type: Help and added it to issue #21")
    );
}

#[tokio::test]
async fn test_pull_request_with_feature_prefix() {
    let client = RecordingLabelClient::new().with_repository_labels(&["Type: Feature"]);
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let outcome = labeler
        .run(&pull_request(8, "[FEAT] add x"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(
        outcome,
        RunOutcome::Labeled {
            kind: ItemKind::PullRequest,
            number: 8,
            label: TypeLabel::Feature,
            label_created: false,
        }
    );
    assert_eq!(client.item_labels(8), vec!["Type: Feature".to_string()]);
}

#[tokio::test]
async fn test_title_without_prefix_makes_no_calls() {
    let client = RecordingLabelClient::new();
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let outcome = labeler
        .run(&issue(4, "no brackets here"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(
        outcome,
        RunOutcome::Skipped {
            kind: ItemKind::Issue,
            number: 4,
            reason: SkipReason::NoPrefix,
        }
    );
    assert!(client.calls().is_empty());
    assert_eq!(reporter.output(OUTPUT_OUTCOME).as_deref(), Some("skipped"));
    assert_eq!(reporter.output(OUTPUT_LABEL), None);
    assert_eq!(
        reporter.output(OUTPUT_MESSAGE).as_deref(),
        Some("No issue title prefix found, skip")
    );
}

#[tokio::test]
async fn test_unmatched_prefix_is_skipped_by_default() {
    let client = RecordingLabelClient::new();
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let outcome = labeler
        .run(&pull_request(6, "[] empty"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(
        outcome,
        RunOutcome::Skipped {
            kind: ItemKind::PullRequest,
            number: 6,
            reason: SkipReason::NoMatchingKeyword {
                prefix: "[]".to_string()
            },
        }
    );
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_unmatched_prefix_gets_other_with_fallback() {
    let client = RecordingLabelClient::new();
    let reporter = RecordingReporter::default();
    let policy = LabelPolicy {
        issue_fallback: true,
        ..LabelPolicy::default()
    };
    let labeler = TitleLabeler::new(&client, &reporter, policy);

    let outcome = labeler
        .run(&issue(6, "[Docs] update readme"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(outcome.label(), Some(TypeLabel::Other));
    assert_eq!(client.item_labels(6), vec!["Type: Other".to_string()]);
}

#[tokio::test]
async fn test_non_string_title_is_skipped() {
    let client = RecordingLabelClient::new();
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());
    let payload: EventPayload =
        serde_json::from_value(json!({ "issue": { "number": 2, "title": ["[Bug]"] } })).unwrap();

    let outcome = labeler.run(&payload, REPOSITORY).await.expect("run failed");

    assert!(matches!(
        outcome,
        RunOutcome::Skipped {
            reason: SkipReason::TitleNotString,
            ..
        }
    ));
    assert!(client.calls().is_empty());
    assert_eq!(
        reporter.output(OUTPUT_MESSAGE).as_deref(),
        Some("The issue title is not a string, skip")
    );
}

#[tokio::test]
async fn test_already_labeled_item() {
    let client = RecordingLabelClient::new().with_item_labels(5, &["Type: Bug"]);
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let outcome = labeler
        .run(&issue(5, "[bug] again"), REPOSITORY)
        .await
        .expect("run failed");

    assert_eq!(
        outcome,
        RunOutcome::AlreadyLabeled {
            kind: ItemKind::Issue,
            number: 5,
            label: TypeLabel::Bug,
        }
    );
    assert_eq!(client.calls().len(), 1);
    assert_eq!(
        reporter.output(OUTPUT_OUTCOME).as_deref(),
        Some("already-labeled")
    );
}

#[tokio::test]
async fn test_missing_item_fails_before_any_call() {
    let client = RecordingLabelClient::new();
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let result = labeler.run(&EventPayload::default(), REPOSITORY).await;

    assert!(matches!(
        result,
        Err(LabelerError::Context(ContextError::NoItem))
    ));
    assert!(client.calls().is_empty());
    assert!(reporter.outputs().is_empty());
}

#[tokio::test]
async fn test_api_failure_is_reported_with_step() {
    let client =
        RecordingLabelClient::new().failing("add_labels", || github_client::Error::NotFound);
    let reporter = RecordingReporter::default();
    let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());

    let result = labeler.run(&issue(3, "[Fix] crash"), REPOSITORY).await;

    assert!(matches!(
        result,
        Err(LabelerError::Apply {
            step: ApplyStep::AddLabel,
            number: 3,
            ..
        })
    ));
    assert!(reporter.outputs().is_empty());
}

#[test]
fn test_run_outcome_strings() {
    let labeled = RunOutcome::Labeled {
        kind: ItemKind::PullRequest,
        number: 1,
        label: TypeLabel::Bug,
        label_created: false,
    };
    assert_eq!(labeled.as_str(), "labeled");
    assert_eq!(labeled.to_string(), "Added label Type: Bug to pull request #1");

    let skipped = RunOutcome::Skipped {
        kind: ItemKind::PullRequest,
        number: 1,
        reason: SkipReason::NoMatchingKeyword {
            prefix: "[docs]".to_string(),
        },
    };
    assert_eq!(skipped.label(), None);
    assert_eq!(
        skipped.to_string(),
        "The pull request title prefix [docs] matches no label, skip"
    );
}
