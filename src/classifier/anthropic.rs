//! Anthropic Messages API classifier implementation.

use super::{ClassifierCall, ClassifierError, ModelClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Smallest thinking budget the Messages API accepts. Smaller derived
/// budgets are raised to it.
pub const MIN_PROVIDER_THINKING_BUDGET: u32 = 1024;

/// Classifier backed by the Anthropic Messages API.
///
/// - POST /v1/messages with x-api-key header
/// - Extended thinking capped by the derived budget, raised to the provider minimum
/// - Response text is the concatenation of the `text` content blocks
pub struct AnthropicClassifier {
    model: String,
    /// Base URL (e.g., "https://api.anthropic.com")
    base_url: String,
    /// API key for x-api-key authentication
    api_key: String,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl AnthropicClassifier {
    pub fn new(
        model: String,
        base_url: String,
        api_key: String,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            client,
        }
    }

    fn build_request(&self, call: &ClassifierCall) -> MessagesRequest {
        let budget_tokens = call.thinking_budget.max(MIN_PROVIDER_THINKING_BUDGET);
        if budget_tokens != call.thinking_budget {
            tracing::debug!(
                derived = call.thinking_budget,
                sent = budget_tokens,
                "Thinking budget raised to provider minimum"
            );
        }

        MessagesRequest {
            model: self.model.clone(),
            system: call.system.clone(),
            messages: vec![MessagesMessage {
                role: "user".to_string(),
                content: call.prompt.clone(),
            }],
            // max_tokens must cover the thinking budget plus the answer
            max_tokens: budget_tokens + call.max_output_tokens,
            thinking: Thinking {
                thinking_type: "enabled".to_string(),
                budget_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    system: String,
    messages: Vec<MessagesMessage>,
    max_tokens: u32,
    thinking: Thinking,
}

#[derive(Debug, Serialize)]
struct MessagesMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Thinking {
    #[serde(rename = "type")]
    thinking_type: String,
    budget_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ModelClassifier for AnthropicClassifier {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, call: &ClassifierCall) -> Result<String, ClassifierError> {
        let url = format!("{}/v1/messages", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&self.build_request(call))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClassifierError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Anthropic classifier call failed");
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: MessagesResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse messages response: {}", e))
        })?;

        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidResponse(
                "no text content in response".to_string(),
            ));
        }
        Ok(text)
    }
}
