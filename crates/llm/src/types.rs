//! LLM Types
//!
//! Request/response data structures and the error taxonomy shared by all
//! providers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use content_cascade_core::CoreError;

/// Default model used for research planning.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ============================================================================
// Configuration
// ============================================================================

/// Connection and sampling settings for a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (never serialized)
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Override for the chat-completions endpoint
    pub base_url: Option<String>,
    /// Model identifier
    pub model: String,
    /// Completion token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 200,
            temperature: 0.7,
            timeout_secs: None,
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// A single text message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    #[default]
    EndTurn,
    MaxTokens,
    ContentFilter,
    Other,
}

impl From<&str> for StopReason {
    fn from(reason: &str) -> Self {
        match reason {
            "stop" | "end_turn" => StopReason::EndTurn,
            "length" | "max_tokens" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFilter,
            _ => StopReason::Other,
        }
    }
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A complete (non-streaming) model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Generated text, if any
    pub content: Option<String>,
    pub stop_reason: StopReason,
    pub usage: UsageStats,
    pub model: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors returned by LLM providers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Every LLM failure is an upstream provider failure from the loop's point of view.
impl From<LlmError> for CoreError {
    fn from(err: LlmError) -> Self {
        CoreError::provider("llm", err.to_string())
    }
}
