//! Settings Models
//!
//! Application configuration and settings data structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum number of full pipeline passes per run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Directory receiving research.md, article files and images
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Model used for research planning
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// Optional OpenAI-compatible endpoint override
    #[serde(default)]
    pub llm_base_url: Option<String>,
    /// Completion token limit for planning
    #[serde(default = "default_llm_max_tokens")]
    pub llm_max_tokens: u32,
    /// Sampling temperature for planning
    #[serde(default = "default_llm_temperature")]
    pub llm_temperature: f32,
    /// Web search provider: "tavily", "brave", or "duckduckgo"
    #[serde(default = "default_search_provider")]
    pub search_provider: String,
    /// Search results requested per plan section
    #[serde(default = "default_max_results")]
    pub search_max_results: u32,
    /// Images requested per topic
    #[serde(default = "default_max_results")]
    pub image_max_results: u32,
    /// Time-to-live of plan and image caches, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Soft capacity bound of each cache
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
    /// Optional per-provider-call time budget, in seconds
    #[serde(default)]
    pub provider_timeout_secs: Option<u64>,
    /// Heading used by the article writer
    #[serde(default = "default_article_title")]
    pub article_title: String,
}

fn default_max_iterations() -> u32 {
    3
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_llm_model() -> String {
    content_cascade_llm::DEFAULT_MODEL.to_string()
}

fn default_llm_max_tokens() -> u32 {
    200
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_search_provider() -> String {
    "duckduckgo".to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_cache_max_entries() -> u64 {
    100
}

fn default_article_title() -> String {
    "Latest Advancements in Artificial Intelligence".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            output_dir: default_output_dir(),
            llm_model: default_llm_model(),
            llm_base_url: None,
            llm_max_tokens: default_llm_max_tokens(),
            llm_temperature: default_llm_temperature(),
            search_provider: default_search_provider(),
            search_max_results: default_max_results(),
            image_max_results: default_max_results(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            provider_timeout_secs: None,
            article_title: default_article_title(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub max_iterations: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub llm_model: Option<String>,
    pub llm_base_url: Option<String>,
    pub search_provider: Option<String>,
    pub search_max_results: Option<u32>,
    pub image_max_results: Option<u32>,
    pub cache_ttl_secs: Option<u64>,
    pub provider_timeout_secs: Option<u64>,
    pub article_title: Option<String>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(max) = update.max_iterations {
            self.max_iterations = max;
        }
        if let Some(dir) = update.output_dir {
            self.output_dir = dir;
        }
        if let Some(model) = update.llm_model {
            self.llm_model = model;
        }
        if let Some(url) = update.llm_base_url {
            self.llm_base_url = Some(url);
        }
        if let Some(provider) = update.search_provider {
            self.search_provider = provider;
        }
        if let Some(n) = update.search_max_results {
            self.search_max_results = n;
        }
        if let Some(n) = update.image_max_results {
            self.image_max_results = n;
        }
        if let Some(ttl) = update.cache_ttl_secs {
            self.cache_ttl_secs = ttl;
        }
        if let Some(timeout) = update.provider_timeout_secs {
            self.provider_timeout_secs = Some(timeout);
        }
        if let Some(title) = update.article_title {
            self.article_title = title;
        }
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }
        let valid_providers = ["tavily", "brave", "brave_search", "duckduckgo"];
        if !valid_providers.contains(&self.search_provider.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid search_provider: {}. Must be one of: {:?}",
                self.search_provider, valid_providers
            ));
        }
        if self.search_max_results == 0 || self.search_max_results > 10 {
            return Err("search_max_results must be between 1 and 10".to_string());
        }
        if self.image_max_results == 0 {
            return Err("image_max_results must be at least 1".to_string());
        }
        if self.cache_ttl_secs == 0 {
            return Err("cache_ttl_secs must be positive".to_string());
        }
        if self.provider_timeout_secs == Some(0) {
            return Err("provider_timeout_secs must be positive when set".to_string());
        }
        if self.llm_model.trim().is_empty() {
            return Err("llm_model must not be empty".to_string());
        }
        Ok(())
    }
}
