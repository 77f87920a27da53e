//! Content Cascade Quality Gates
//!
//! Acceptance predicates, structured feedback and topic mutation for the
//! editing loop. Everything in this crate is pure and synchronous:
//!
//! - `models` - Reviewed artifact kinds and structured diagnostics
//! - `gates` - Plan / research / draft predicates and the originality ratio
//! - `feedback` - Priority-ordered diagnostics for rejected artifacts
//! - `mutator` - Folds a diagnostic into the next iteration's topic

pub mod feedback;
pub mod gates;
pub mod models;
pub mod mutator;

// Re-export model types
pub use models::{ArtifactKind, Diagnostic, DiagnosticReason};

// Re-export gate predicates and thresholds
pub use gates::{
    gate_draft, gate_plan, gate_research, missing_sections, originality_ratio,
    MAX_ORIGINALITY_RATIO, MIN_DRAFT_CHARS, MIN_EXCERPT_CHARS, MIN_SOURCES, RELEVANCE_TERMS,
    REQUIRED_SECTIONS,
};

// Re-export feedback and mutation
pub use feedback::{draft_feedback, plan_feedback, research_feedback};
pub use mutator::{directive_for, mutate_topic};
