//! OpenAI-compatible classifier implementation.

use super::{ClassifierCall, ClassifierError, ModelClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Classifier backed by an OpenAI-compatible chat completions endpoint.
///
/// Works with OpenAI itself and with gateways that speak the same protocol
/// (OpenRouter, vLLM, LM Studio). Provider routing options are forwarded as
/// the `provider` field of the request body and the derived thinking budget as
/// `reasoning.max_tokens`.
pub struct OpenAiClassifier {
    /// Model identifier sent with each request
    model: String,
    /// Base URL (e.g., "https://api.openai.com")
    base_url: String,
    /// API key for Bearer authentication
    api_key: String,
    /// Request deadline enforced at the transport level
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAiClassifier {
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

    fn build_request(&self, call: &ClassifierCall) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: call.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: call.prompt.clone(),
                },
            ],
            max_tokens: call.max_output_tokens,
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            reasoning: Reasoning {
                max_tokens: call.thinking_budget,
            },
            provider: call.provider_options.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
    reasoning: Reasoning,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<Value>,
}

/// Reasoning token cap for the classification call
#[derive(Debug, Serialize)]
struct Reasoning {
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion response, reduced to what the classifier reads
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ModelClassifier for OpenAiClassifier {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, call: &ClassifierCall) -> Result<String, ClassifierError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&self.build_request(call))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClassifierError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClassifierError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ClassifierError::InvalidResponse("empty completion".to_string()))
    }
}
