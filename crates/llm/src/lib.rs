//! Content Cascade LLM
//!
//! Provides a unified interface for the language model that drafts research
//! plans. Ships an OpenAI-compatible chat-completions client; any endpoint
//! speaking the same protocol can be targeted through `ProviderConfig::base_url`.
//!
//! Also includes the HTTP client factory shared by the search and image providers.

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;
