//! Gate Feedback
//!
//! One diagnostic per gate. Conditions are checked in priority order and the
//! first match wins, so a single reason is surfaced per review.

use crate::gates::{
    gate_draft, gate_plan, gate_research, is_draft_too_short, is_too_short, missing_sections,
    MIN_SOURCES,
};
use crate::models::{ArtifactKind, Diagnostic, DiagnosticReason};

/// Diagnose a research plan.
pub fn plan_feedback(plan: &[String]) -> Diagnostic {
    if gate_plan(plan) {
        return Diagnostic::new(
            ArtifactKind::Plan,
            DiagnosticReason::Accepted,
            "The research plan looks good. No further changes needed.",
        );
    }

    let missing = missing_sections(plan);
    let message = format!(
        "The research plan is missing the following sections: {}. Please include them in the next iteration.",
        missing.join(", ")
    );
    Diagnostic::new(
        ArtifactKind::Plan,
        DiagnosticReason::MissingSections(missing),
        message,
    )
}

/// Diagnose research results: source count, then excerpt length, then relevance.
pub fn research_feedback(research: &[String]) -> Diagnostic {
    if gate_research(research) {
        return Diagnostic::new(
            ArtifactKind::Research,
            DiagnosticReason::Accepted,
            "The research results are sufficient. No further changes needed.",
        );
    }

    if research.len() < MIN_SOURCES {
        Diagnostic::new(
            ArtifactKind::Research,
            DiagnosticReason::TooFewSources,
            format!(
                "The research results need more sources. Please include at least {} relevant sources in the next iteration.",
                MIN_SOURCES
            ),
        )
    } else if research.iter().any(|excerpt| is_too_short(excerpt)) {
        Diagnostic::new(
            ArtifactKind::Research,
            DiagnosticReason::ExcerptsTooShort,
            "Some research results are too short. Please provide more detailed information for each result.",
        )
    } else {
        Diagnostic::new(
            ArtifactKind::Research,
            DiagnosticReason::MissingKeywords,
            "The research results should include more relevant keywords related to artificial intelligence. Please focus on topics such as machine learning, deep learning, and neural networks.",
        )
    }
}

/// Diagnose a draft: length first, then overlap with the research.
pub fn draft_feedback(draft: &str, research: &[String]) -> Diagnostic {
    if gate_draft(draft, research) {
        return Diagnostic::new(
            ArtifactKind::Draft,
            DiagnosticReason::Accepted,
            "The article looks good. No further changes needed.",
        );
    }

    if is_draft_too_short(draft) {
        Diagnostic::new(
            ArtifactKind::Draft,
            DiagnosticReason::DraftTooShort,
            "The article is too short. Please elaborate on the topic and aim for at least 1000 words.",
        )
    } else {
        Diagnostic::new(
            ArtifactKind::Draft,
            DiagnosticReason::ExcessiveOverlap,
            "The article contains too much plagiarism. Please rephrase the content and ensure it is original.",
        )
    }
}
