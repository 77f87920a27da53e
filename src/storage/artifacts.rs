//! Filesystem Artifact Store
//!
//! Everything the editing loop leaves on disk lives under one output
//! directory:
//!
//! - `research.md` - raw excerpts of the latest research pass (overwritten)
//! - `article.md` - the writer's most recent draft (overwritten)
//! - `article_iteration_{n}.md` - each accepted article
//! - `image_{i}.jpg` - downloaded images, 1-based

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use content_cascade_core::{ArtifactStore, CoreError, CoreResult};

pub const RESEARCH_FILE: &str = "research.md";
pub const DRAFT_FILE: &str = "article.md";

/// Filesystem-backed artifact store rooted at an output directory.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn research_path(&self) -> PathBuf {
        self.root.join(RESEARCH_FILE)
    }

    pub fn draft_path(&self) -> PathBuf {
        self.root.join(DRAFT_FILE)
    }

    pub fn article_path(&self, iteration: u32) -> PathBuf {
        self.root.join(format!("article_iteration_{}.md", iteration))
    }

    /// Path of the `index`-th image (1-based)
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("image_{}.jpg", index))
    }

    /// Overwrite the research artifact with `excerpts` joined by newlines
    pub async fn write_research(&self, excerpts: &[String]) -> CoreResult<PathBuf> {
        let path = self.research_path();
        self.write(&path, excerpts.join("\n").as_bytes()).await?;
        Ok(path)
    }

    /// Read back the research artifact
    pub async fn read_research(&self) -> CoreResult<String> {
        let path = self.research_path();
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| persistence("read", &path, e))
    }

    /// Overwrite the working draft
    pub async fn write_draft(&self, article: &str) -> CoreResult<PathBuf> {
        let path = self.draft_path();
        self.write(&path, article.as_bytes()).await?;
        Ok(path)
    }

    /// Persist image bytes as `image_{index}.jpg`
    pub async fn save_image(&self, index: usize, bytes: &[u8]) -> CoreResult<PathBuf> {
        let path = self.image_path(index);
        self.write(&path, bytes).await?;
        Ok(path)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> CoreResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| persistence("create", &self.root, e))?;
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| persistence("write", path, e))
    }
}

fn persistence(action: &str, path: &Path, err: std::io::Error) -> CoreError {
    CoreError::persistence(format!("Failed to {} {}: {}", action, path.display(), err))
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn save_article(&self, iteration: u32, article: &str) -> CoreResult<PathBuf> {
        let path = self.article_path(iteration);
        self.write(&path, article.as_bytes()).await?;
        tracing::info!(path = %path.display(), "article saved");
        Ok(path)
    }
}
