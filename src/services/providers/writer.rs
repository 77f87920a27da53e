//! Article Writer
//!
//! Builds the article from the persisted research artifact rather than from
//! memory, so the draft always reflects what is on disk.

use async_trait::async_trait;
use content_cascade_core::{CoreResult, DraftProvider};

use crate::storage::FsArtifactStore;

/// Render the article body
pub fn render_article(title: &str, research: &str) -> String {
    format!("# Article on {}\n\n{}", title, research)
}

pub struct ArtifactDraftProvider {
    store: FsArtifactStore,
    title: String,
}

impl ArtifactDraftProvider {
    pub fn new(store: FsArtifactStore, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }
}

#[async_trait]
impl DraftProvider for ArtifactDraftProvider {
    fn name(&self) -> &str {
        "artifact_writer"
    }

    async fn write(&self, research: &[String]) -> CoreResult<String> {
        let content = self.store.read_research().await?;
        tracing::debug!(excerpts = research.len(), chars = content.len(), "writing article");

        let article = render_article(&self.title, &content);
        self.store.write_draft(&article).await?;
        Ok(article)
    }
}
