//! Editor
//!
//! The approve/revise loop that drives plan -> research -> draft through the
//! quality gates, folding feedback into the topic until a draft is accepted or
//! the iteration budget runs out.

pub mod orchestrator;

use std::path::PathBuf;
use std::time::Duration;

use content_cascade_quality_gates::Diagnostic;

use crate::models::iteration::EditorStage;
use crate::models::settings::AppConfig;

pub use orchestrator::{Editor, EditorProviders};

// Progress components and steps
pub const EDITOR_AGENT: &str = "EditorAgent";
pub const RESEARCH_AGENT: &str = "ResearchAgent";
pub const WRITER_AGENT: &str = "WriterAgent";
pub const IMAGE_AGENT: &str = "ImageAgent";

pub const START_EDITING: &str = "Start Editing Process";
pub const CREATE_PLAN: &str = "Create Research Plan";
pub const EXECUTE_RESEARCH: &str = "Execute Research";
pub const WRITE_ARTICLE: &str = "Write Article";
pub const RETRIEVE_IMAGES: &str = "Retrieve Images";

/// Loop limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Number of full pipeline passes allowed (at least 1)
    pub max_iterations: u32,
    /// Per-provider-call time budget
    pub provider_timeout: Option<Duration>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            provider_timeout: None,
        }
    }
}

impl From<&AppConfig> for EditorConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            provider_timeout: config.provider_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Events emitted while the editor runs
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// A new pipeline pass started
    IterationStarted { iteration: u32, topic: String },
    /// The loop moved to `stage`
    StageEntered { iteration: u32, stage: EditorStage },
    /// A review stage rejected its artifact
    GateRejected {
        iteration: u32,
        stage: EditorStage,
        feedback: Diagnostic,
    },
    /// Image retrieval failed after the article was accepted
    ImagesFailed { error: String },
    /// An article was accepted and saved
    Completed { iteration: u32, article_path: PathBuf },
    /// Budget exhausted without an accepted article
    Exhausted { iterations: u32 },
}
