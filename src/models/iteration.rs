//! Iteration Models
//!
//! Data structures for the editing loop: the stage machine, the per-iteration
//! record and the final run outcome.

use std::path::PathBuf;

use content_cascade_quality_gates::Diagnostic;
use serde::{Deserialize, Serialize};

/// Stage of the editing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStage {
    /// Asking the plan provider for a research plan
    Planning,
    /// Checking the plan gate
    PlanReview,
    /// Running research for the accepted plan
    Researching,
    /// Checking the research gate
    ResearchReview,
    /// Writing the article draft
    Drafting,
    /// Checking the draft gate
    DraftReview,
    /// Persisting the accepted draft and fetching images
    Success,
    /// Folding feedback into the topic before the next pass
    Retry,
    /// Terminal
    Done,
}

impl EditorStage {
    /// Whether no further transitions happen from this stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, EditorStage::Done)
    }
}

impl std::fmt::Display for EditorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EditorStage::Planning => "planning",
            EditorStage::PlanReview => "plan_review",
            EditorStage::Researching => "researching",
            EditorStage::ResearchReview => "research_review",
            EditorStage::Drafting => "drafting",
            EditorStage::DraftReview => "draft_review",
            EditorStage::Success => "success",
            EditorStage::Retry => "retry",
            EditorStage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// How a single iteration ended.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationOutcome {
    /// Still running
    #[default]
    Pending,
    /// All gates passed
    Accepted,
    /// A gate rejected an artifact
    Rejected(Diagnostic),
}

/// Working state of one pipeline pass.
///
/// Created at loop entry and dropped once its feedback has been folded into
/// the topic; no history is kept across iterations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub plan: Vec<String>,
    pub research: Vec<String>,
    pub draft: Option<String>,
    pub outcome: IterationOutcome,
}

impl IterationRecord {
    /// Create a new record for `iteration`
    pub fn new(iteration: u32) -> Self {
        Self {
            iteration,
            ..Default::default()
        }
    }

    /// Mark this iteration rejected
    pub fn reject(&mut self, diagnostic: Diagnostic) {
        self.outcome = IterationOutcome::Rejected(diagnostic);
    }

    /// The rejection diagnostic, if any
    pub fn rejection(&self) -> Option<&Diagnostic> {
        match &self.outcome {
            IterationOutcome::Rejected(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

/// Final status of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RunStatus {
    /// A draft passed every gate and was persisted
    Completed { iteration: u32, article_path: PathBuf },
    /// The iteration budget ran out without an accepted draft
    Exhausted,
}

/// What a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Number of pipeline passes executed
    pub iterations_run: u32,
    /// Topic after all feedback was folded in
    pub final_topic: String,
    /// Image references (empty when retrieval failed or the run was exhausted)
    pub images: Vec<String>,
    /// Progress report (empty if the recorder could not produce one)
    pub report: String,
}

impl RunOutcome {
    /// Whether a draft was accepted
    pub fn is_completed(&self) -> bool {
        matches!(self.status, RunStatus::Completed { .. })
    }
}
