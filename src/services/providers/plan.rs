//! LLM Plan Provider
//!
//! Asks a chat model for a research plan and turns each reply line into a
//! section identifier (`"2. Current State"` -> `current_state`).

use std::sync::Arc;

use async_trait::async_trait;
use content_cascade_core::{CoreError, CoreResult, PlanProvider};
use content_cascade_llm::{LlmProvider, Message};

use crate::services::cache::TtlCache;

pub const PLAN_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the user prompt for `topic`
pub fn plan_prompt(topic: &str) -> String {
    format!("Create a research plan for the topic: {}\n\nPlan:", topic)
}

/// Normalise one reply line into a section identifier.
///
/// Returns `None` for lines that are blank once list markers are removed.
pub fn normalize_section(line: &str) -> Option<String> {
    let mut text = line.trim();

    if let Some(rest) = text.strip_prefix(['-', '*']) {
        text = rest.trim_start();
    } else {
        let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            if let Some(rest) = text[digits..].strip_prefix(['.', ')']) {
                text = rest.trim_start();
            }
        }
    }

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(
        text.to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect(),
    )
}

/// Split a model reply into ordered section identifiers
pub fn parse_plan(reply: &str) -> Vec<String> {
    reply.lines().filter_map(normalize_section).collect()
}

/// `PlanProvider` backed by an `LlmProvider`, memoised per topic.
pub struct LlmPlanProvider {
    llm: Arc<dyn LlmProvider>,
    cache: TtlCache<String, Vec<String>>,
}

impl LlmPlanProvider {
    pub fn new(llm: Arc<dyn LlmProvider>, cache: TtlCache<String, Vec<String>>) -> Self {
        Self { llm, cache }
    }

    async fn request_plan(&self, topic: &str) -> CoreResult<Vec<String>> {
        let response = self
            .llm
            .send_message(
                vec![Message::user(plan_prompt(topic))],
                Some(PLAN_SYSTEM_PROMPT.to_string()),
            )
            .await?;

        let reply = response
            .content
            .ok_or_else(|| CoreError::provider(self.name(), "model returned an empty reply"))?;

        let plan = parse_plan(&reply);
        if plan.is_empty() {
            return Err(CoreError::provider(
                self.name(),
                "model reply contained no plan sections",
            ));
        }
        Ok(plan)
    }
}

#[async_trait]
impl PlanProvider for LlmPlanProvider {
    fn name(&self) -> &str {
        "llm_plan"
    }

    async fn create_plan(&self, topic: &str) -> CoreResult<Vec<String>> {
        self.cache
            .get_or_try_insert_with(topic.to_string(), || async {
                let plan = self.request_plan(topic).await?;
                tracing::info!(
                    model = self.llm.model(),
                    sections = plan.len(),
                    "research plan created"
                );
                Ok(plan)
            })
            .await
    }
}
