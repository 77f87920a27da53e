//! Image Agent
//!
//! Searches for images matching a topic, downloads them concurrently and
//! stores each as `image_{i}.jpg`. The list of image URLs is cached per topic.

use std::sync::Arc;

use async_trait::async_trait;
use content_cascade_core::{CoreError, CoreResult, ImageProvider};
use futures_util::future::join_all;
use regex::Regex;

use crate::services::cache::TtlCache;
use crate::storage::FsArtifactStore;

/// Where image URLs and bytes come from
#[async_trait]
pub trait ImageSource: Send + Sync {
    fn name(&self) -> &str;

    /// Image URLs matching `query`, best match first
    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<String>>;

    /// Raw bytes of one image
    async fn download(&self, url: &str) -> CoreResult<Vec<u8>>;
}

/// DuckDuckGo image search (no API key required)
pub struct DuckDuckGoImages {
    client: reqwest::Client,
    token_pattern: Regex,
}

impl DuckDuckGoImages {
    pub fn new(client: reqwest::Client) -> CoreResult<Self> {
        let token_pattern = Regex::new(r#"vqd=["']?([\d-]+)["']?"#)
            .map_err(|e| CoreError::internal(format!("invalid vqd pattern: {}", e)))?;
        Ok(Self {
            client,
            token_pattern,
        })
    }

    /// Extract the `vqd` search token from the landing page
    fn extract_token(&self, html: &str) -> Option<String> {
        self.token_pattern
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    async fn fetch_token(&self, query: &str) -> CoreResult<String> {
        let html = self
            .client
            .get("https://duckduckgo.com/")
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("request failed: {}", e)))?
            .text()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("unreadable page: {}", e)))?;

        self.extract_token(&html)
            .ok_or_else(|| CoreError::provider(self.name(), "search token not found"))
    }
}

fn parse_image_results(data: &serde_json::Value, max_results: usize) -> Vec<String> {
    data.get("results")
        .and_then(|r| r.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.get("image").and_then(|i| i.as_str()))
                .filter(|url| !url.is_empty())
                .take(max_results)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ImageSource for DuckDuckGoImages {
    fn name(&self) -> &str {
        "DuckDuckGo Images"
    }

    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<String>> {
        let vqd = self.fetch_token(query).await?;

        let response = self
            .client
            .get("https://duckduckgo.com/i.js")
            .header("Referer", "https://duckduckgo.com/")
            .query(&[
                ("l", "us-en"),
                ("o", "json"),
                ("q", query),
                ("vqd", vqd.as_str()),
                ("f", ",,,"),
                ("p", "1"),
            ])
            .send()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::provider(
                self.name(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("malformed response: {}", e)))?;

        Ok(parse_image_results(&data, max_results as usize))
    }

    async fn download(&self, url: &str) -> CoreResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("download failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::provider(
                self.name(),
                format!("download of {} returned HTTP {}", url, status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("download failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// `ImageProvider` that persists every successfully downloaded image.
pub struct ImageAgent {
    source: Arc<dyn ImageSource>,
    store: FsArtifactStore,
    max_results: u32,
    cache: TtlCache<String, Vec<String>>,
}

impl ImageAgent {
    pub fn new(
        source: Arc<dyn ImageSource>,
        store: FsArtifactStore,
        max_results: u32,
        cache: TtlCache<String, Vec<String>>,
    ) -> Self {
        Self {
            source,
            store,
            max_results,
            cache,
        }
    }

    async fn download_one(&self, index: usize, url: &str) -> CoreResult<String> {
        let bytes = self.source.download(url).await?;
        self.store.save_image(index, &bytes).await?;
        Ok(url.to_string())
    }

    /// Search and download; failed downloads are logged and skipped.
    async fn retrieve(&self, topic: &str) -> CoreResult<Vec<String>> {
        let urls = self.source.search(topic, self.max_results).await?;

        let downloads = urls
            .iter()
            .enumerate()
            .map(|(i, url)| self.download_one(i + 1, url));
        let results = join_all(downloads).await;

        let mut saved = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(url) => saved.push(url),
                Err(e) => tracing::warn!(error = %e, "image download skipped"),
            }
        }

        tracing::info!(found = urls.len(), saved = saved.len(), "images retrieved");
        Ok(saved)
    }
}

#[async_trait]
impl ImageProvider for ImageAgent {
    fn name(&self) -> &str {
        self.source.name()
    }

    async fn fetch(&self, topic: &str) -> CoreResult<Vec<String>> {
        if let Some(hit) = self.cache.get(&topic.to_string()) {
            tracing::debug!(topic, "image cache hit");
            return Ok(hit);
        }

        let images = self.retrieve(topic).await?;
        if !images.is_empty() {
            self.cache.insert(topic.to_string(), images.clone());
        }
        Ok(images)
    }
}
