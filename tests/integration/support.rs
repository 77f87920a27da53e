//! Test doubles shared by the integration tests.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use content_cascade::services::progress::ProgressTracker;
use content_cascade::{EditorEvent, EditorProviders};
use content_cascade_core::{
    ArtifactStore, CoreError, CoreResult, DraftProvider, ImageProvider, PlanProvider,
    ProgressRecorder, ResearchProvider,
};
use tokio::sync::mpsc;

// ============================================================================
// Fixtures
// ============================================================================

pub fn full_plan() -> Vec<String> {
    [
        "introduction",
        "background",
        "current_state",
        "future_developments",
        "conclusion",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn plan_without(section: &str) -> Vec<String> {
    full_plan().into_iter().filter(|s| s != section).collect()
}

/// One excerpt that passes the research gate on its own
pub fn good_excerpt(i: usize) -> String {
    format!("source {} discusses machine learning {}", i, "detail ".repeat(30))
}

pub fn good_research() -> Vec<String> {
    (0..5).map(good_excerpt).collect()
}

/// A long draft sharing no tokens with `good_research`
pub fn original_draft() -> String {
    (0..300)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Providers
// ============================================================================

/// Returns queued plans in order, repeating the last one; records topics
pub struct ScriptedPlan {
    plans: Mutex<VecDeque<Vec<String>>>,
    last: Mutex<Vec<String>>,
    pub topics: Mutex<Vec<String>>,
}

impl ScriptedPlan {
    pub fn new(plans: Vec<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(plans.into()),
            last: Mutex::new(Vec::new()),
            topics: Mutex::new(Vec::new()),
        })
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanProvider for ScriptedPlan {
    fn name(&self) -> &str {
        "scripted_plan"
    }

    async fn create_plan(&self, topic: &str) -> CoreResult<Vec<String>> {
        self.topics.lock().unwrap().push(topic.to_string());
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.plans.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

pub struct FailingPlan;

#[async_trait]
impl PlanProvider for FailingPlan {
    fn name(&self) -> &str {
        "failing_plan"
    }

    async fn create_plan(&self, _: &str) -> CoreResult<Vec<String>> {
        Err(CoreError::provider("failing_plan", "service unavailable"))
    }
}

pub struct FixedResearch {
    excerpts: Vec<String>,
    pub calls: AtomicUsize,
}

impl FixedResearch {
    pub fn new(excerpts: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            excerpts,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchProvider for FixedResearch {
    fn name(&self) -> &str {
        "fixed_research"
    }

    async fn execute(&self, _: &[String]) -> CoreResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.excerpts.clone())
    }
}

pub struct FixedDraft {
    draft: String,
    pub calls: AtomicUsize,
}

impl FixedDraft {
    pub fn new(draft: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            draft: draft.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftProvider for FixedDraft {
    fn name(&self) -> &str {
        "fixed_draft"
    }

    async fn write(&self, _: &[String]) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.draft.clone())
    }
}

pub struct StaticImages {
    result: Result<Vec<String>, String>,
    pub calls: AtomicUsize,
}

impl StaticImages {
    pub fn ok(images: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(images.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Err("image host unreachable".to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for StaticImages {
    fn name(&self) -> &str {
        "static_images"
    }

    async fn fetch(&self, _: &str) -> CoreResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(|e| CoreError::provider("static_images", e))
    }
}

/// Keeps saved articles in memory
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<(u32, String)>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            saved: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn saved(&self) -> Vec<(u32, String)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn save_article(&self, iteration: u32, article: &str) -> CoreResult<PathBuf> {
        if self.fail {
            return Err(CoreError::persistence("disk full"));
        }
        self.saved
            .lock()
            .unwrap()
            .push((iteration, article.to_string()));
        Ok(PathBuf::from(format!("article_iteration_{}.md", iteration)))
    }
}

/// Recorder whose every call fails
pub struct BrokenRecorder;

impl ProgressRecorder for BrokenRecorder {
    fn begin(&self, _: &str, _: &str) -> CoreResult<()> {
        Err(CoreError::internal("recorder offline"))
    }

    fn finish(&self, _: &str, _: &str) -> CoreResult<()> {
        Err(CoreError::internal("recorder offline"))
    }

    fn report(&self) -> CoreResult<String> {
        Err(CoreError::internal("recorder offline"))
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Doubles used by one editor run
pub struct Harness {
    pub plan: Arc<ScriptedPlan>,
    pub research: Arc<FixedResearch>,
    pub draft: Arc<FixedDraft>,
    pub images: Arc<StaticImages>,
    pub store: Arc<MemoryStore>,
    pub tracker: Arc<ProgressTracker>,
}

impl Harness {
    /// Every gate passes on the first iteration
    pub fn accepting() -> Self {
        Self {
            plan: ScriptedPlan::new(vec![full_plan()]),
            research: FixedResearch::new(good_research()),
            draft: FixedDraft::new(original_draft()),
            images: StaticImages::ok(&["https://img/1.jpg", "https://img/2.jpg"]),
            store: MemoryStore::new(),
            tracker: Arc::new(ProgressTracker::new()),
        }
    }

    pub fn providers(&self) -> EditorProviders {
        EditorProviders {
            plan: self.plan.clone(),
            research: self.research.clone(),
            draft: self.draft.clone(),
            images: self.images.clone(),
            store: self.store.clone(),
            recorder: self.tracker.clone(),
        }
    }
}

/// Drain every buffered event
pub fn drain(rx: &mut mpsc::Receiver<EditorEvent>) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
