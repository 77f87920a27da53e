//! Capability Traits
//!
//! The editing loop never talks to an LLM, a search engine, an image host or
//! the filesystem directly. Every side effect goes through one of these traits:
//!
//! - `PlanProvider` - topic -> ordered section identifiers
//! - `ResearchProvider` - plan -> ordered source excerpts
//! - `DraftProvider` - excerpts -> article text
//! - `ImageProvider` - topic -> ordered image references
//! - `ArtifactStore` - persists accepted articles
//! - `ProgressRecorder` - step bookkeeping for the final report
//!
//! Implementations are injected into the orchestrator at construction, which
//! keeps the loop free of ambient state and trivially mockable in tests.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CoreResult;

// ============================================================================
// Content Providers
// ============================================================================

/// Produces a research plan for a topic.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Provider name used in logs and error messages.
    fn name(&self) -> &str;

    /// Create an ordered list of section identifiers for `topic`.
    ///
    /// Fails with `CoreError::Provider` when the upstream service is
    /// unreachable or its output cannot be turned into a plan.
    async fn create_plan(&self, topic: &str) -> CoreResult<Vec<String>>;
}

/// Gathers source excerpts for every section of a plan.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Execute the plan and return excerpts in plan order.
    ///
    /// Implementations persist the raw excerpts as a traceability artifact.
    async fn execute(&self, plan: &[String]) -> CoreResult<Vec<String>>;
}

/// Turns research excerpts into an article body.
#[async_trait]
pub trait DraftProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn write(&self, research: &[String]) -> CoreResult<String>;
}

/// Retrieves illustrative images for a topic.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch image references for `topic`.
    ///
    /// Each returned reference has been persisted as a numbered local artifact.
    async fn fetch(&self, topic: &str) -> CoreResult<Vec<String>>;
}

// ============================================================================
// Persistence
// ============================================================================

/// Durable home for accepted articles.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist an accepted article under an iteration-tagged name and return
    /// where it was written.
    async fn save_article(&self, iteration: u32, article: &str) -> CoreResult<PathBuf>;
}

// ============================================================================
// Progress Recording
// ============================================================================

/// Records start/end of named steps per component.
///
/// The orchestrator treats every call as fallible but non-fatal: a recorder
/// error is logged and the loop carries on.
pub trait ProgressRecorder: Send + Sync {
    /// Mark `step` of `component` as started.
    fn begin(&self, component: &str, step: &str) -> CoreResult<()>;

    /// Mark the most recent in-progress `step` of `component` as completed.
    fn finish(&self, component: &str, step: &str) -> CoreResult<()>;

    /// Human-readable summary of every recorded step.
    fn report(&self) -> CoreResult<String>;
}
