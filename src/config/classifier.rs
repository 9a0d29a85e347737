//! Classifier configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Wire protocol spoken by the classification endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierProvider {
    /// OpenAI-compatible chat completions (OpenAI, OpenRouter, vLLM, ...)
    #[default]
    Openai,
    /// Anthropic Messages API
    Anthropic,
}

impl ClassifierProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ClassifierProvider::Openai => "https://api.openai.com",
            ClassifierProvider::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ClassifierProvider::Openai => "OPENAI_API_KEY",
            ClassifierProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl FromStr for ClassifierProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ClassifierProvider::Openai),
            "anthropic" => Ok(ClassifierProvider::Anthropic),
            _ => Err(format!("Unknown classifier provider: {}", s)),
        }
    }
}

/// Model classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Route with the model classifier; deterministic-only when false
    pub enabled: bool,
    pub provider: ClassifierProvider,
    /// Provider base URL; the provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub model: String,
    /// Environment variable holding the API key; the provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub timeout_ms: u64,
    /// Provider routing options forwarded untouched with each call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<serde_json::Value>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: ClassifierProvider::Openai,
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            timeout_ms: 8000,
            provider_options: None,
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn resolved_api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }
}
