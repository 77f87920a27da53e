//! Topic Mutator
//!
//! Folds a rejected review back into the topic for the next iteration by
//! appending a parenthetical directive. The directive is chosen from the
//! diagnostic's reason tag; the message text is never parsed.

use crate::models::{Diagnostic, DiagnosticReason};

/// Directive appended for a rejection reason, or `None` when accepted.
pub fn directive_for(reason: &DiagnosticReason) -> Option<String> {
    let directive = match reason {
        DiagnosticReason::Accepted => return None,
        DiagnosticReason::MissingSections(sections) => {
            format!("Focus on adding: {}", sections.join(", "))
        }
        DiagnosticReason::TooFewSources => "Include more sources".to_string(),
        DiagnosticReason::ExcerptsTooShort => "Provide more detailed information".to_string(),
        DiagnosticReason::MissingKeywords => {
            "Focus on AI, machine learning, deep learning, neural networks".to_string()
        }
        DiagnosticReason::DraftTooShort => "Provide more detailed information".to_string(),
        DiagnosticReason::ExcessiveOverlap => "Rephrase and ensure originality".to_string(),
    };
    Some(directive)
}

/// Produce the topic for the next iteration.
///
/// Directives accumulate: applying the same diagnostic twice appends it twice.
pub fn mutate_topic(topic: &str, diagnostic: &Diagnostic) -> String {
    match directive_for(&diagnostic.reason) {
        Some(directive) => format!("{} ({})", topic, directive),
        None => topic.to_string(),
    }
}
