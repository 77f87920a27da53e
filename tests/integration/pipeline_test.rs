//! Pipeline Integration Tests
//!
//! Runs the default providers (plan from a chat model, web research, the
//! artifact writer, the image agent and the filesystem store) through the
//! editor against a temporary output directory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use content_cascade::services::cache::TtlCache;
use content_cascade::services::progress::ProgressTracker;
use content_cascade::services::providers::{
    ArtifactDraftProvider, ImageAgent, ImageSource, LlmPlanProvider, WebResearchProvider,
};
use content_cascade::services::search::{SearchProvider, SearchResult, WebSearchService};
use content_cascade::storage::FsArtifactStore;
use content_cascade::{Editor, EditorConfig, EditorProviders, RunStatus};
use content_cascade_core::CoreResult;
use content_cascade_llm::{LlmProvider, LlmResponse, LlmResult, Message, ProviderConfig, StopReason};
use tempfile::TempDir;

use crate::support::*;

const TOPIC: &str = "Latest advancements in artificial intelligence";

// ============================================================================
// Doubles for the outer services
// ============================================================================

struct NumberedPlanLlm {
    config: ProviderConfig,
}

#[async_trait]
impl LlmProvider for NumberedPlanLlm {
    fn name(&self) -> &'static str {
        "numbered"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(&self, _: Vec<Message>, _: Option<String>) -> LlmResult<LlmResponse> {
        Ok(LlmResponse {
            content: Some(
                "1. Introduction\n2. Background\n3. Current State\n4. Future Developments\n5. Conclusion"
                    .to_string(),
            ),
            stop_reason: StopReason::EndTurn,
            usage: Default::default(),
            model: self.config.model.clone(),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

struct TopicalSearch;

#[async_trait]
impl SearchProvider for TopicalSearch {
    fn name(&self) -> &str {
        "topical"
    }

    async fn search(&self, query: &str, _: u32) -> CoreResult<Vec<SearchResult>> {
        Ok(vec![SearchResult {
            title: query.to_string(),
            url: format!("https://example.com/{}", query.replace(' ', "-")),
            snippet: format!(
                "{} machine learning research {}",
                query,
                "insight ".repeat(25)
            ),
        }])
    }
}

struct CountingImages {
    searches: AtomicUsize,
}

#[async_trait]
impl ImageSource for CountingImages {
    fn name(&self) -> &str {
        "counting"
    }

    async fn search(&self, _: &str, max_results: u32) -> CoreResult<Vec<String>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok((1..=max_results.min(2))
            .map(|i| format!("https://img.example.com/{}.jpg", i))
            .collect())
    }

    async fn download(&self, url: &str) -> CoreResult<Vec<u8>> {
        Ok(url.as_bytes().to_vec())
    }
}

fn image_agent(store: &FsArtifactStore, source: Arc<CountingImages>) -> Arc<ImageAgent> {
    Arc::new(ImageAgent::new(
        source,
        store.clone(),
        5,
        TtlCache::new(Duration::from_secs(3600), 100),
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_default_writer_is_rejected_for_overlap() {
    let temp = TempDir::new().unwrap();
    let store = FsArtifactStore::new(temp.path().join("out"));
    let source = Arc::new(CountingImages {
        searches: AtomicUsize::new(0),
    });

    let providers = EditorProviders {
        plan: Arc::new(LlmPlanProvider::new(
            Arc::new(NumberedPlanLlm {
                config: ProviderConfig::default(),
            }),
            TtlCache::default(),
        )),
        research: Arc::new(WebResearchProvider::new(
            WebSearchService::with_provider(Box::new(TopicalSearch)),
            store.clone(),
            5,
        )),
        draft: Arc::new(ArtifactDraftProvider::new(
            store.clone(),
            "Latest Advancements in Artificial Intelligence",
        )),
        images: image_agent(&store, source.clone()),
        store: Arc::new(store.clone()),
        recorder: Arc::new(ProgressTracker::new()),
    };

    let outcome = Editor::new(
        EditorConfig {
            max_iterations: 2,
            provider_timeout: None,
        },
        providers,
    )
    .run(TOPIC)
    .await
    .unwrap();

    // The writer copies research verbatim, so the draft never passes
    assert_eq!(outcome.status, RunStatus::Exhausted);
    assert_eq!(
        outcome.final_topic,
        format!(
            "{} (Rephrase and ensure originality) (Rephrase and ensure originality)",
            TOPIC
        )
    );
    assert_eq!(source.searches.load(Ordering::SeqCst), 0);

    let research = std::fs::read_to_string(store.research_path()).unwrap();
    assert_eq!(research.lines().count(), 5);
    assert!(research.starts_with("introduction machine learning research"));
    assert!(research.contains("\nfuture developments machine learning research"));

    let article = std::fs::read_to_string(store.draft_path()).unwrap();
    assert!(article.starts_with("# Article on Latest Advancements in Artificial Intelligence\n\n"));
    assert!(!store.article_path(1).exists());
    assert!(!store.article_path(2).exists());
}

#[tokio::test]
async fn test_accepted_article_and_images_land_on_disk() {
    let temp = TempDir::new().unwrap();
    let store = FsArtifactStore::new(temp.path());
    let source = Arc::new(CountingImages {
        searches: AtomicUsize::new(0),
    });
    let images = image_agent(&store, source.clone());

    let harness = Harness::accepting();
    let mut providers = harness.providers();
    providers.images = images;
    providers.store = Arc::new(store.clone());
    let editor = Editor::new(EditorConfig::default(), providers);

    let first = editor.run(TOPIC).await.unwrap();
    match &first.status {
        RunStatus::Completed {
            iteration,
            article_path,
        } => {
            assert_eq!(*iteration, 1);
            assert_eq!(article_path, &store.article_path(1));
            assert_eq!(std::fs::read_to_string(article_path).unwrap(), original_draft());
        }
        RunStatus::Exhausted => panic!("expected an accepted article"),
    }
    assert_eq!(first.images.len(), 2);
    assert!(store.image_path(1).exists());
    assert!(store.image_path(2).exists());

    // Same topic within the TTL: served from the image cache
    let second = editor.run(TOPIC).await.unwrap();
    assert_eq!(second.images, first.images);
    assert_eq!(source.searches.load(Ordering::SeqCst), 1);
}
