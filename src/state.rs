//! Application State
//!
//! Wires configuration and credentials into a ready-to-run editor. Every
//! client, cache and provider is built here and handed down; nothing is global.

use std::sync::Arc;
use std::time::Duration;

use content_cascade_llm::{build_http_client, OpenAIProvider, ProviderConfig};

use crate::models::iteration::RunOutcome;
use crate::models::settings::AppConfig;
use crate::services::cache::TtlCache;
use crate::services::editor::{Editor, EditorConfig, EditorProviders};
use crate::services::progress::ProgressTracker;
use crate::services::providers::{
    ArtifactDraftProvider, DuckDuckGoImages, ImageAgent, LlmPlanProvider, WebResearchProvider,
};
use crate::services::search::WebSearchService;
use crate::storage::FsArtifactStore;
use crate::utils::error::{AppError, AppResult};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const SEARCH_API_KEY_VAR: &str = "SEARCH_API_KEY";

/// Secrets taken from the environment, never from config.json
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub search_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: read(OPENAI_API_KEY_VAR),
            search_api_key: read(SEARCH_API_KEY_VAR),
        }
    }
}

/// Configured editor plus the tracker it reports to
pub struct AppState {
    config: AppConfig,
    editor: Editor,
    tracker: Arc<ProgressTracker>,
}

impl AppState {
    /// Build every provider from `config`
    pub fn build(config: AppConfig, credentials: Credentials) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;

        if credentials.openai_api_key.is_none() {
            tracing::warn!("{} is not set; planning requests will be rejected", OPENAI_API_KEY_VAR);
        }

        let client = build_http_client(config.provider_timeout_secs)?;
        let store = FsArtifactStore::new(&config.output_dir);
        let ttl = Duration::from_secs(config.cache_ttl_secs);

        let llm = OpenAIProvider::with_client(
            ProviderConfig {
                api_key: credentials.openai_api_key,
                base_url: config.llm_base_url.clone(),
                model: config.llm_model.clone(),
                max_tokens: config.llm_max_tokens,
                temperature: config.llm_temperature,
                timeout_secs: config.provider_timeout_secs,
            },
            client.clone(),
        );
        let plan = LlmPlanProvider::new(
            Arc::new(llm),
            TtlCache::new(ttl, config.cache_max_entries),
        );

        let search = WebSearchService::new(
            &config.search_provider,
            credentials.search_api_key.as_deref(),
            client.clone(),
        )?;
        let research = WebResearchProvider::new(search, store.clone(), config.search_max_results);

        let draft = ArtifactDraftProvider::new(store.clone(), config.article_title.clone());

        let images = ImageAgent::new(
            Arc::new(DuckDuckGoImages::new(client)?),
            store.clone(),
            config.image_max_results,
            TtlCache::new(ttl, config.cache_max_entries),
        );

        let tracker = Arc::new(ProgressTracker::new());
        let providers = EditorProviders {
            plan: Arc::new(plan),
            research: Arc::new(research),
            draft: Arc::new(draft),
            images: Arc::new(images),
            store: Arc::new(store),
            recorder: tracker.clone(),
        };
        let editor = Editor::new(EditorConfig::from(&config), providers);

        Ok(Self {
            config,
            editor,
            tracker,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Run the editor for `topic`
    pub async fn run(&self, topic: &str) -> AppResult<RunOutcome> {
        Ok(self.editor.run(topic).await?)
    }
}
