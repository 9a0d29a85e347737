//! Classifier factory for creating ModelClassifier trait objects from configuration.

use super::{
    anthropic::AnthropicClassifier, openai::OpenAiClassifier, ClassifierError, ModelClassifier,
};
use crate::config::{ClassifierConfig, ClassifierProvider};
use reqwest::Client;
use std::sync::Arc;

/// Create the configured classifier.
///
/// Returns `Ok(None)` when the classifier is disabled, in which case routing
/// runs on deterministic and memory signals only. The API key is read from
/// the configured environment variable.
///
/// # Examples
///
/// ```
/// use skillroute::classifier::create_classifier;
/// use skillroute::config::ClassifierConfig;
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let config = ClassifierConfig::default(); // disabled
/// let classifier = create_classifier(&config, Arc::new(Client::new())).unwrap();
/// assert!(classifier.is_none());
/// ```
pub fn create_classifier(
    config: &ClassifierConfig,
    client: Arc<Client>,
) -> Result<Option<Arc<dyn ModelClassifier>>, ClassifierError> {
    if !config.enabled {
        return Ok(None);
    }

    let env_var = config.resolved_api_key_env();
    let api_key = std::env::var(env_var).map_err(|e| {
        ClassifierError::Configuration(format!(
            "Failed to read API key from env var '{}': {}",
            env_var, e
        ))
    })?;

    let model = config.model.clone();
    let base_url = config.resolved_base_url().to_string();
    let timeout = config.timeout();

    let classifier: Arc<dyn ModelClassifier> = match config.provider {
        ClassifierProvider::Openai => Arc::new(OpenAiClassifier::new(
            model, base_url, api_key, timeout, client,
        )),
        ClassifierProvider::Anthropic => Arc::new(AnthropicClassifier::new(
            model, base_url, api_key, timeout, client,
        )),
    };

    tracing::debug!(
        provider = ?config.provider,
        model = classifier.model_id(),
        "Classifier created"
    );

    Ok(Some(classifier))
}
