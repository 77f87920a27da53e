//! Quality Gate Models
//!
//! Data structures describing which artifact a gate reviewed and why it was
//! rejected.

use serde::{Deserialize, Serialize};

/// The artifact a quality gate reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Research plan (ordered section identifiers)
    Plan,
    /// Research excerpts
    Research,
    /// Article draft
    Draft,
}

impl ArtifactKind {
    /// Get human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::Plan => "research plan",
            ArtifactKind::Research => "research results",
            ArtifactKind::Draft => "article",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Plan => write!(f, "plan"),
            ArtifactKind::Research => write!(f, "research"),
            ArtifactKind::Draft => write!(f, "draft"),
        }
    }
}

/// Why a gate accepted or rejected an artifact.
///
/// Only the highest-priority violation is ever reported, even when several
/// invariants fail at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum DiagnosticReason {
    /// The artifact passed its gate
    Accepted,
    /// Required plan sections are absent, in required-set order
    MissingSections(Vec<String>),
    /// Fewer research excerpts than the minimum
    TooFewSources,
    /// At least one excerpt is below the minimum length
    ExcerptsTooShort,
    /// At least one excerpt mentions none of the relevance terms
    MissingKeywords,
    /// The draft is below the minimum length
    DraftTooShort,
    /// The draft shares too many distinct tokens with the research
    ExcessiveOverlap,
}

impl DiagnosticReason {
    /// Check if this reason indicates acceptance
    pub fn is_accepted(&self) -> bool {
        matches!(self, DiagnosticReason::Accepted)
    }
}

/// Structured gate feedback: a reason tag with its payload plus the
/// human-readable sentence shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Artifact that was reviewed
    pub artifact: ArtifactKind,
    /// Machine-readable reason
    pub reason: DiagnosticReason,
    /// One diagnostic sentence
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(artifact: ArtifactKind, reason: DiagnosticReason, message: impl Into<String>) -> Self {
        Self {
            artifact,
            reason,
            message: message.into(),
        }
    }

    /// Check if the reviewed artifact was accepted
    pub fn is_accepted(&self) -> bool {
        self.reason.is_accepted()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
