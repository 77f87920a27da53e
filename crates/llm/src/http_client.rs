//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients shared by the LLM,
//! search and image providers.

use std::time::Duration;

use content_cascade_core::{CoreError, CoreResult};

/// User agent sent with every outbound request.
pub const USER_AGENT: &str = "ContentCascade/0.1";

/// Build a `reqwest::Client` with an optional request timeout.
pub fn build_http_client(timeout_secs: Option<u64>) -> CoreResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| CoreError::config(format!("failed to build HTTP client: {}", e)))
}
