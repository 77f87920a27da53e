//! Quality Gate Predicates
//!
//! Pure acceptance checks over already-materialized artifacts. No I/O.
//!
//! Lengths are counted in characters. Tokens are whitespace-delimited and
//! case-folded.

use std::collections::HashSet;

// ============================================================================
// Thresholds
// ============================================================================

/// Sections every research plan must contain, in reporting order.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "introduction",
    "background",
    "current_state",
    "future_developments",
    "conclusion",
];

/// Minimum number of research excerpts.
pub const MIN_SOURCES: usize = 5;

/// Minimum characters per research excerpt.
pub const MIN_EXCERPT_CHARS: usize = 200;

/// Each excerpt must mention at least one of these (lowercase substring match).
pub const RELEVANCE_TERMS: [&str; 4] = [
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural networks",
];

/// Minimum characters in an accepted draft.
pub const MIN_DRAFT_CHARS: usize = 1000;

/// Maximum tolerated originality ratio (shared distinct tokens / distinct draft tokens).
pub const MAX_ORIGINALITY_RATIO: f64 = 0.1;

// ============================================================================
// Plan
// ============================================================================

/// True iff every required section identifier appears in `plan`.
pub fn gate_plan(plan: &[String]) -> bool {
    missing_sections(plan).is_empty()
}

/// Required sections absent from `plan`, in required-set order.
pub fn missing_sections(plan: &[String]) -> Vec<String> {
    REQUIRED_SECTIONS
        .iter()
        .filter(|section| !plan.iter().any(|id| id == *section))
        .map(|section| section.to_string())
        .collect()
}

// ============================================================================
// Research
// ============================================================================

/// True iff there are enough excerpts and each one is long and relevant.
pub fn gate_research(research: &[String]) -> bool {
    if research.len() < MIN_SOURCES {
        return false;
    }

    research
        .iter()
        .all(|excerpt| !is_too_short(excerpt) && is_relevant(excerpt))
}

pub(crate) fn is_too_short(excerpt: &str) -> bool {
    excerpt.chars().count() < MIN_EXCERPT_CHARS
}

pub(crate) fn is_relevant(excerpt: &str) -> bool {
    let lowered = excerpt.to_lowercase();
    RELEVANCE_TERMS.iter().any(|term| lowered.contains(term))
}

// ============================================================================
// Draft
// ============================================================================

/// True iff the draft is long enough and does not lean too heavily on the
/// research wording.
pub fn gate_draft(draft: &str, research: &[String]) -> bool {
    if is_draft_too_short(draft) {
        return false;
    }

    let ratio = originality_ratio(draft, research);
    tracing::debug!(ratio, "draft originality ratio");
    ratio <= MAX_ORIGINALITY_RATIO
}

pub(crate) fn is_draft_too_short(draft: &str) -> bool {
    draft.chars().count() < MIN_DRAFT_CHARS
}

/// Share of the draft's distinct tokens that also occur anywhere in the research.
///
/// The denominator is the number of *distinct* draft tokens, not the total
/// token count. A draft without tokens scores 0.0.
pub fn originality_ratio(draft: &str, research: &[String]) -> f64 {
    let draft_tokens = distinct_tokens(draft);
    if draft_tokens.is_empty() {
        return 0.0;
    }

    let research_tokens: HashSet<String> = research
        .iter()
        .flat_map(|excerpt| excerpt.split_whitespace())
        .map(str::to_lowercase)
        .collect();

    let shared = draft_tokens
        .iter()
        .filter(|token| research_tokens.contains(*token))
        .count();

    shared as f64 / draft_tokens.len() as f64
}

fn distinct_tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
