//! WebSearch Service
//!
//! Pluggable web search with support for Tavily, Brave Search, and DuckDuckGo providers.

use async_trait::async_trait;
use content_cascade_core::{CoreError, CoreResult};

/// Upper bound on results requested from any provider
pub const MAX_RESULTS_CAP: u32 = 10;

/// A search result entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Trait for pluggable search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for display
    fn name(&self) -> &str;

    /// Execute a search query
    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<SearchResult>>;
}

fn str_field(item: &serde_json::Value, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Tavily search provider (requires API key)
struct TavilyProvider {
    client: reqwest::Client,
    api_key: String,
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "Tavily"
    }

    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<SearchResult>> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "include_answer": false,
        });

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(CoreError::provider(
                self.name(),
                format!("API error ({}): {}", status.as_u16(), err_body),
            ));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("malformed response: {}", e)))?;

        Ok(parse_tavily(&data))
    }
}

fn parse_tavily(data: &serde_json::Value) -> Vec<SearchResult> {
    data.get("results")
        .and_then(|r| r.as_array())
        .map(|arr| {
            arr.iter()
                .map(|item| SearchResult {
                    title: str_field(item, "title"),
                    url: str_field(item, "url"),
                    snippet: str_field(item, "content"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Brave Search provider (requires API key)
struct BraveSearchProvider {
    client: reqwest::Client,
    api_key: String,
}

#[async_trait]
impl SearchProvider for BraveSearchProvider {
    fn name(&self) -> &str {
        "Brave Search"
    }

    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<SearchResult>> {
        let response = self
            .client
            .get("https://api.search.brave.com/res/v1/web/search")
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", &max_results.to_string())])
            .send()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            return Err(CoreError::provider(
                self.name(),
                format!("API error ({}): {}", status.as_u16(), err_body),
            ));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CoreError::provider(self.name(), format!("malformed response: {}", e)))?;

        Ok(parse_brave(&data))
    }
}

fn parse_brave(data: &serde_json::Value) -> Vec<SearchResult> {
    data.get("web")
        .and_then(|w| w.get("results"))
        .and_then(|r| r.as_array())
        .map(|arr| {
            arr.iter()
                .map(|item| SearchResult {
                    title: str_field(item, "title"),
                    url: str_field(item, "url"),
                    snippet: str_field(item, "description"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// DuckDuckGo instant answer provider (no API key required, limited results)
struct DuckDuckGoProvider {
    client: reqwest::Client,
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<SearchResult>> {
        let response = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
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

        Ok(parse_duckduckgo(&data, max_results as usize))
    }
}

fn parse_duckduckgo(data: &serde_json::Value, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    // Abstract (main result)
    if let Some(abstract_text) = data.get("AbstractText").and_then(|t| t.as_str()) {
        if !abstract_text.is_empty() {
            results.push(SearchResult {
                title: data
                    .get("Heading")
                    .and_then(|h| h.as_str())
                    .unwrap_or("Result")
                    .to_string(),
                url: str_field(data, "AbstractURL"),
                snippet: abstract_text.to_string(),
            });
        }
    }

    // Related topics
    if let Some(topics) = data.get("RelatedTopics").and_then(|r| r.as_array()) {
        for topic in topics {
            if results.len() >= max_results {
                break;
            }
            if let Some(text) = topic.get("Text").and_then(|t| t.as_str()) {
                results.push(SearchResult {
                    title: text.chars().take(80).collect::<String>(),
                    url: str_field(topic, "FirstURL"),
                    snippet: text.to_string(),
                });
            }
        }
    }

    results.truncate(max_results);
    results
}

/// WebSearch service with pluggable provider
pub struct WebSearchService {
    provider: Box<dyn SearchProvider>,
}

impl WebSearchService {
    /// Create a new WebSearch service with the specified provider.
    ///
    /// - `"tavily"` requires an API key
    /// - `"brave"` requires an API key
    /// - `"duckduckgo"` works without an API key (limited results)
    pub fn new(
        provider_name: &str,
        api_key: Option<&str>,
        client: reqwest::Client,
    ) -> CoreResult<Self> {
        let provider: Box<dyn SearchProvider> = match provider_name.to_lowercase().as_str() {
            "tavily" => {
                let key = api_key
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| CoreError::config("Tavily requires an API key (SEARCH_API_KEY)"))?;
                Box::new(TavilyProvider {
                    client,
                    api_key: key.to_string(),
                })
            }
            "brave" | "brave_search" => {
                let key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                    CoreError::config("Brave Search requires an API key (SEARCH_API_KEY)")
                })?;
                Box::new(BraveSearchProvider {
                    client,
                    api_key: key.to_string(),
                })
            }
            "duckduckgo" | "" => Box::new(DuckDuckGoProvider { client }),
            other => {
                return Err(CoreError::config(format!(
                    "Unknown search provider: '{}'. Supported: tavily, brave, duckduckgo",
                    other
                )))
            }
        };

        Ok(Self { provider })
    }

    /// Wrap an already constructed provider
    pub fn with_provider(provider: Box<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Execute a web search and return the raw results.
    pub async fn search(&self, query: &str, max_results: u32) -> CoreResult<Vec<SearchResult>> {
        let max_results = max_results.clamp(1, MAX_RESULTS_CAP);

        // Sanitize query: strip control chars
        let query: String = query
            .chars()
            .filter(|c| !c.is_control() || *c == ' ')
            .collect();

        if query.trim().is_empty() {
            return Err(CoreError::validation("Search query cannot be empty"));
        }

        self.provider.search(&query, max_results).await
    }

    /// Get the name of the underlying search provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
