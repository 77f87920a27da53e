//! Web Research Provider
//!
//! Runs one web search per plan section and records the collected snippets
//! in `research.md`.

use async_trait::async_trait;
use content_cascade_core::{CoreResult, ResearchProvider};

use crate::services::search::WebSearchService;
use crate::storage::FsArtifactStore;

/// Turn a section identifier back into a search query
pub fn section_query(section: &str) -> String {
    section.replace('_', " ")
}

pub struct WebResearchProvider {
    search: WebSearchService,
    store: FsArtifactStore,
    max_results: u32,
}

impl WebResearchProvider {
    pub fn new(search: WebSearchService, store: FsArtifactStore, max_results: u32) -> Self {
        Self {
            search,
            store,
            max_results,
        }
    }
}

#[async_trait]
impl ResearchProvider for WebResearchProvider {
    fn name(&self) -> &str {
        self.search.provider_name()
    }

    async fn execute(&self, plan: &[String]) -> CoreResult<Vec<String>> {
        let mut excerpts = Vec::new();
        for section in plan {
            let query = section_query(section);
            let results = self.search.search(&query, self.max_results).await?;
            tracing::debug!(%query, hits = results.len(), "section searched");
            excerpts.extend(results.into_iter().map(|r| r.snippet));
        }

        let path = self.store.write_research(&excerpts).await?;
        tracing::info!(
            excerpts = excerpts.len(),
            path = %path.display(),
            "research executed"
        );
        Ok(excerpts)
    }
}
