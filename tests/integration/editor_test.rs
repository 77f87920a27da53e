//! Editor Integration Tests
//!
//! Drives the full state machine with in-memory providers and checks the
//! transitions, topic revisions, persistence and progress bookkeeping.

use std::sync::Arc;

use content_cascade::services::progress::ProgressStatus;
use content_cascade::{Editor, EditorConfig, EditorEvent, EditorStage, RunStatus};
use content_cascade_core::CoreError;
use content_cascade_quality_gates::DiagnosticReason;
use tokio::sync::mpsc;

use crate::support::*;

const TOPIC: &str = "Latest advancements in artificial intelligence";

fn config(max_iterations: u32) -> EditorConfig {
    EditorConfig {
        max_iterations,
        provider_timeout: None,
    }
}

// ============================================================================
// Acceptance
// ============================================================================

#[tokio::test]
async fn test_first_iteration_accepted() {
    let harness = Harness::accepting();
    let (tx, mut rx) = mpsc::channel(256);
    let editor = Editor::new(config(3), harness.providers()).with_events(tx);

    let outcome = editor.run(TOPIC).await.unwrap();

    assert_eq!(
        outcome.status,
        RunStatus::Completed {
            iteration: 1,
            article_path: "article_iteration_1.md".into(),
        }
    );
    assert_eq!(outcome.iterations_run, 1);
    assert_eq!(outcome.final_topic, TOPIC);
    assert_eq!(outcome.images, vec!["https://img/1.jpg", "https://img/2.jpg"]);

    // Research ran in the first iteration
    assert_eq!(harness.plan.topics(), vec![TOPIC]);
    assert_eq!(harness.research.calls(), 1);
    assert_eq!(harness.draft.calls(), 1);
    assert_eq!(harness.images.calls(), 1);
    assert_eq!(harness.store.saved(), vec![(1, original_draft())]);

    let stages: Vec<EditorStage> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            EditorEvent::StageEntered { stage, .. } => Some(stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![
            EditorStage::Planning,
            EditorStage::PlanReview,
            EditorStage::Researching,
            EditorStage::ResearchReview,
            EditorStage::Drafting,
            EditorStage::DraftReview,
            EditorStage::Success,
        ]
    );
}

#[tokio::test]
async fn test_report_lists_every_step() {
    let harness = Harness::accepting();
    let outcome = Editor::new(config(3), harness.providers())
        .run(TOPIC)
        .await
        .unwrap();

    assert!(outcome.report.starts_with("Progress Report:\n\nEditorAgent:\n"));
    for step in [
        "Start Editing Process",
        "Create Research Plan",
        "Execute Research",
        "Write Article",
        "Retrieve Images",
    ] {
        assert!(
            outcome.report.contains(&format!("  - {}: Completed (Duration: ", step)),
            "missing {} in\n{}",
            step,
            outcome.report
        );
    }
    assert!(outcome.report.contains("WriterAgent:\n"));
    assert!(outcome.report.contains("ImageAgent:\n"));
}

// ============================================================================
// Revision
// ============================================================================

#[tokio::test]
async fn test_missing_section_revises_topic() {
    let mut harness = Harness::accepting();
    harness.plan = ScriptedPlan::new(vec![plan_without("conclusion"), full_plan()]);
    let (tx, mut rx) = mpsc::channel(256);

    let outcome = Editor::new(config(3), harness.providers())
        .with_events(tx)
        .run(TOPIC)
        .await
        .unwrap();

    let revised = format!("{} (Focus on adding: conclusion)", TOPIC);
    assert_eq!(harness.plan.topics(), vec![TOPIC.to_string(), revised.clone()]);
    assert_eq!(outcome.final_topic, revised);
    assert!(matches!(outcome.status, RunStatus::Completed { iteration: 2, .. }));
    assert_eq!(harness.research.calls(), 1);

    let rejection = drain(&mut rx)
        .into_iter()
        .find_map(|e| match e {
            EditorEvent::GateRejected {
                iteration,
                stage,
                feedback,
            } => Some((iteration, stage, feedback)),
            _ => None,
        })
        .unwrap();
    assert_eq!(rejection.0, 1);
    assert_eq!(rejection.1, EditorStage::PlanReview);
    assert!(rejection
        .2
        .message
        .contains("missing the following sections: conclusion"));
}

#[tokio::test]
async fn test_short_excerpt_rejects_research() {
    let mut harness = Harness::accepting();
    let mut research = good_research();
    research[2] = format!("machine learning {}", "x".repeat(133));
    assert_eq!(research[2].chars().count(), 150);
    harness.research = FixedResearch::new(research);
    let (tx, mut rx) = mpsc::channel(256);

    let outcome = Editor::new(config(1), harness.providers())
        .with_events(tx)
        .run(TOPIC)
        .await
        .unwrap();

    assert_eq!(outcome.status, RunStatus::Exhausted);
    assert_eq!(
        outcome.final_topic,
        format!("{} (Provide more detailed information)", TOPIC)
    );
    assert_eq!(harness.draft.calls(), 0);

    let feedback = drain(&mut rx)
        .into_iter()
        .find_map(|e| match e {
            EditorEvent::GateRejected { feedback, .. } => Some(feedback),
            _ => None,
        })
        .unwrap();
    assert_eq!(feedback.reason, DiagnosticReason::ExcerptsTooShort);
    assert_eq!(
        feedback.message,
        "Some research results are too short. Please provide more detailed information for each result."
    );
}

#[tokio::test]
async fn test_draft_rejection_restarts_at_planning() {
    let mut harness = Harness::accepting();
    harness.draft = FixedDraft::new("too short");

    let outcome = Editor::new(config(2), harness.providers())
        .run(TOPIC)
        .await
        .unwrap();

    assert_eq!(outcome.status, RunStatus::Exhausted);
    assert_eq!(
        harness.plan.topics(),
        vec![
            TOPIC.to_string(),
            format!("{} (Provide more detailed information)", TOPIC)
        ]
    );
    assert_eq!(harness.research.calls(), 2);
    assert!(harness.store.saved().is_empty());
}

// ============================================================================
// Exhaustion
// ============================================================================

#[tokio::test]
async fn test_budget_exhausted_after_three_plan_rejections() {
    let mut harness = Harness::accepting();
    harness.plan = ScriptedPlan::new(vec![vec!["introduction".to_string()]]);
    let (tx, mut rx) = mpsc::channel(256);

    let outcome = Editor::new(config(3), harness.providers())
        .with_events(tx)
        .run(TOPIC)
        .await
        .unwrap();

    assert_eq!(outcome.status, RunStatus::Exhausted);
    assert_eq!(outcome.iterations_run, 3);
    assert!(outcome.images.is_empty());
    assert_eq!(harness.plan.topics().len(), 3);
    assert_eq!(harness.research.calls(), 0);
    assert_eq!(harness.images.calls(), 0);
    assert!(harness.store.saved().is_empty());

    // Directives accumulate on every rejection
    let directive = "(Focus on adding: background, current_state, future_developments, conclusion)";
    assert_eq!(outcome.final_topic.matches(directive).count(), 3);

    // One entry per invocation, all completed
    let entries = harness.tracker.entries().unwrap();
    let plans: Vec<_> = entries
        .iter()
        .filter(|e| e.step == "Create Research Plan")
        .collect();
    assert_eq!(plans.len(), 3);
    assert!(entries.iter().all(|e| e.status == ProgressStatus::Completed));
    assert_eq!(
        outcome.report.matches("Create Research Plan: Completed").count(),
        3
    );

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, EditorEvent::Exhausted { iterations: 3 })));
    assert!(!events.iter().any(|e| matches!(
        e,
        EditorEvent::StageEntered {
            stage: EditorStage::Success,
            ..
        }
    )));
}

#[tokio::test]
async fn test_research_rejections_record_both_steps() {
    let mut harness = Harness::accepting();
    harness.research = FixedResearch::new(good_research()[..3].to_vec());

    let outcome = Editor::new(config(3), harness.providers())
        .run(TOPIC)
        .await
        .unwrap();

    assert_eq!(outcome.status, RunStatus::Exhausted);
    assert_eq!(outcome.report.matches("Create Research Plan: Completed").count(), 3);
    assert_eq!(outcome.report.matches("Execute Research: Completed").count(), 3);
    assert_eq!(
        outcome.final_topic.matches("(Include more sources)").count(),
        3
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_recorder_failure_does_not_change_outcome() {
    let harness = Harness::accepting();
    let mut providers = harness.providers();
    providers.recorder = Arc::new(BrokenRecorder);

    let outcome = Editor::new(config(3), providers).run(TOPIC).await.unwrap();

    assert!(outcome.is_completed());
    assert_eq!(outcome.iterations_run, 1);
    assert!(outcome.report.is_empty());
    assert_eq!(harness.store.saved().len(), 1);
}

#[tokio::test]
async fn test_provider_error_aborts_run() {
    let harness = Harness::accepting();
    let mut providers = harness.providers();
    providers.plan = Arc::new(FailingPlan);

    let err = Editor::new(config(3), providers).run(TOPIC).await.unwrap_err();

    assert!(err.is_provider_error());
    assert!(err.to_string().contains("service unavailable"));
    assert_eq!(harness.research.calls(), 0);
}

#[tokio::test]
async fn test_persistence_error_aborts_run() {
    let mut harness = Harness::accepting();
    harness.store = MemoryStore::failing();

    let err = Editor::new(config(3), harness.providers())
        .run(TOPIC)
        .await
        .unwrap_err();

    assert!(err.is_persistence_error());
    assert_eq!(harness.images.calls(), 0);
}

#[tokio::test]
async fn test_image_failure_still_completes() {
    let mut harness = Harness::accepting();
    harness.images = StaticImages::failing();
    let (tx, mut rx) = mpsc::channel(256);

    let outcome = Editor::new(config(3), harness.providers())
        .with_events(tx)
        .run(TOPIC)
        .await
        .unwrap();

    assert!(outcome.is_completed());
    assert!(outcome.images.is_empty());
    assert!(outcome.report.contains("Retrieve Images: In Progress"));
    assert!(drain(&mut rx)
        .iter()
        .any(|e| matches!(e, EditorEvent::ImagesFailed { .. })));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_any_call() {
    let harness = Harness::accepting();

    let err = Editor::new(config(3), harness.providers())
        .run("")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let err = Editor::new(config(0), harness.providers())
        .run(TOPIC)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert!(harness.plan.topics().is_empty());
    assert!(harness.tracker.entries().unwrap().is_empty());
}
