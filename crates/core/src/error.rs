//! Core Error Types
//!
//! Defines the foundational error types used across the Content Cascade
//! workspace. These error types are dependency-free (only thiserror + std) to
//! keep the core crate lightweight.
//!
//! Two families matter to the editing loop:
//! - `Provider` - an upstream capability (LLM, search, image host) failed
//! - `Persistence` - an artifact could not be read or written
//!
//! Both abort the run. A failed quality gate is never an error.

use thiserror::Error;

/// Core error type for the Content Cascade workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Upstream provider unavailable, rate-limited, or returned malformed output
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    /// Artifact read/write failures
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A provider call exceeded its time budget
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from an upstream capability provider.
    ///
    /// Timeouts count as provider failures.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Timeout(_))
    }

    /// Whether this error came from reading or writing an artifact.
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Io(_))
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
