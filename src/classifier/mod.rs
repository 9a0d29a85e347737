//! Model classifier adapter
//!
//! One bounded, JSON-only classification call per routing request. The
//! [`ModelClassifier`] trait is the seam: it takes a fully built
//! [`ClassifierCall`] and returns raw model text. Everything around it
//! (prompt construction, the timeout, lenient parsing, timing) lives here so
//! any provider, or a test double, plugs in without touching routing logic.
//!
//! A failed call is never an error for the caller. [`classify`] reports it as
//! `succeeded: false` with no decision, and the merger falls back to the
//! deterministic and memory signals.

use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

pub mod anthropic;
pub mod error;
pub mod factory;
pub mod openai;

pub use error::ClassifierError;
pub use factory::create_classifier;

use crate::routing::decision::{clamp_confidence, RouteMode};

/// Divisor applied to the caller's thinking budget for the classification call.
pub const THINKING_BUDGET_DIVISOR: u32 = 16;

/// Floor for the derived thinking budget.
pub const MIN_THINKING_BUDGET: u32 = 256;

/// Number of deterministic and memory candidates offered to the model as hints.
pub const MAX_HINTS: usize = 4;

const SYSTEM_PROMPT: &str = "You are a routing classifier. Decide which of the allowed skills \
should handle the user's request. Respond with a single JSON object and nothing else:\n\
{\"selected_skills\": [string], \"mode\": \"focused\" | \"ambiguous\", \"confidence\": number between 0 and 1, \"reason\": string}\n\
Rules:\n\
- Only choose skills from the allowed list.\n\
- Use \"focused\" when one skill clearly owns the request, \"ambiguous\" when several could.\n\
- Candidate hints come from keyword scoring and the user's long-term preferences; they may be wrong.\n\
- Keep the reason under 20 words.";

/// Thinking budget for the classification call: a sixteenth of the caller's
/// budget, never below [`MIN_THINKING_BUDGET`].
pub fn derive_thinking_budget(total_budget: u32) -> u32 {
    (total_budget / THINKING_BUDGET_DIVISOR).max(MIN_THINKING_BUDGET)
}

/// A fully prepared provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierCall {
    pub system: String,
    pub prompt: String,
    /// Reasoning token budget, already derived from the caller's budget
    pub thinking_budget: u32,
    /// Maximum output tokens for the answer
    pub max_output_tokens: u32,
    /// Provider-specific routing options, passed through untouched
    pub provider_options: Option<Value>,
}

/// Callable model-classification primitive.
///
/// Implementations perform exactly one request and return the raw response
/// text. They must not retry.
#[async_trait]
pub trait ModelClassifier: Send + Sync + 'static {
    /// Model identifier reported in routing metadata.
    fn model_id(&self) -> &str;

    /// Execute one classification request and return the model's text.
    async fn complete(&self, call: &ClassifierCall) -> Result<String, ClassifierError>;
}

/// Inputs to one classification, borrowed from the routing pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierRequest<'a> {
    pub allowed_skills: &'a [String],
    /// Top deterministic candidates with their scores
    pub deterministic_hints: &'a [(String, f64)],
    /// Top memory-ranked candidates with their affinity
    pub memory_hints: &'a [(String, usize)],
    pub recent_context: Option<&'a str>,
    pub prompt: &'a str,
}

/// Per-call limits derived from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSettings {
    /// Caller's overall thinking budget (divided down per call)
    pub thinking_budget: u32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
    pub provider_options: Option<Value>,
}

/// Leniently parsed model answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDecision {
    /// String entries only, deduplicated, in model order
    pub selected_skills: Vec<String>,
    /// `None` when the model returned no valid mode
    pub mode: Option<RouteMode>,
    /// Clamped to [0, 1]; 0 when absent or not a number
    pub confidence: f64,
    pub reason: String,
}

/// Result of the classification step as seen by the merger.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutcome {
    pub decision: Option<ModelDecision>,
    pub attempted: bool,
    pub succeeded: bool,
    pub duration_ms: u64,
    pub model: Option<String>,
}

impl ClassifierOutcome {
    /// Outcome when no classifier is available.
    pub fn skipped() -> Self {
        Self {
            decision: None,
            attempted: false,
            succeeded: false,
            duration_ms: 0,
            model: None,
        }
    }
}

fn format_hints<T: std::fmt::Display>(hints: &[(String, T)]) -> String {
    if hints.is_empty() {
        return "none".to_string();
    }
    hints
        .iter()
        .take(MAX_HINTS)
        .map(|(skill, score)| format!("{} ({})", skill, score))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the user message for the classification call.
pub fn build_prompt(request: &ClassifierRequest<'_>) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Allowed skills: {}\n",
        request.allowed_skills.join(", ")
    ));
    prompt.push_str(&format!(
        "Keyword candidates: {}\n",
        format_hints(request.deterministic_hints)
    ));
    prompt.push_str(&format!(
        "Preference candidates: {}\n",
        format_hints(request.memory_hints)
    ));
    if let Some(context) = request.recent_context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\nRecent conversation:\n{}\n", context));
    }
    prompt.push_str(&format!("\nUser request:\n{}\n", request.prompt.trim()));
    prompt
}

/// Build the provider call for a request.
pub fn build_call(request: &ClassifierRequest<'_>, settings: &ClassifierSettings) -> ClassifierCall {
    ClassifierCall {
        system: SYSTEM_PROMPT.to_string(),
        prompt: build_prompt(request),
        thinking_budget: derive_thinking_budget(settings.thinking_budget),
        max_output_tokens: settings.max_output_tokens,
        provider_options: settings.provider_options.clone(),
    }
}

/// Parse the first `{...}` span of a model response into a [`ModelDecision`].
///
/// The span runs from the first `{` to the last `}`. Parsing is lenient:
/// non-string skill entries are dropped, an unknown mode is omitted, and the
/// confidence is clamped (0 when missing). Only a missing or malformed JSON
/// object is an error.
pub fn parse_model_decision(text: &str) -> Result<ModelDecision, ClassifierError> {
    let start = text
        .find('{')
        .ok_or_else(|| ClassifierError::InvalidResponse("no JSON object in response".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ClassifierError::InvalidResponse("unterminated JSON object".to_string()))?;

    let value: Value = serde_json::from_str(&text[start..=end])
        .map_err(|e| ClassifierError::InvalidResponse(format!("malformed JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| ClassifierError::InvalidResponse("expected a JSON object".to_string()))?;

    let mut selected_skills: Vec<String> = Vec::new();
    if let Some(entries) = object.get("selected_skills").and_then(Value::as_array) {
        for skill in entries.iter().filter_map(Value::as_str) {
            let skill = skill.trim();
            if !skill.is_empty() && !selected_skills.iter().any(|s| s == skill) {
                selected_skills.push(skill.to_string());
            }
        }
    }

    let mode = object
        .get("mode")
        .and_then(Value::as_str)
        .and_then(|m| m.parse::<RouteMode>().ok());

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .map(clamp_confidence)
        .unwrap_or(0.0);

    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .map(|r| r.trim().to_string())
        .unwrap_or_default();

    Ok(ModelDecision {
        selected_skills,
        mode,
        confidence,
        reason,
    })
}

/// Run the single classification call for a routing request.
///
/// Enforces `settings.timeout`, times the call, and folds every failure into
/// `succeeded: false`. There is no retry.
pub async fn classify(
    classifier: &dyn ModelClassifier,
    request: &ClassifierRequest<'_>,
    settings: &ClassifierSettings,
) -> ClassifierOutcome {
    let call = build_call(request, settings);
    let model = classifier.model_id().to_string();
    let timeout_ms = settings.timeout.as_millis() as u64;
    let start = Instant::now();

    let result = match tokio::time::timeout(settings.timeout, classifier.complete(&call)).await {
        Ok(Ok(text)) => parse_model_decision(&text),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(ClassifierError::Timeout(timeout_ms)),
    };

    let elapsed = start.elapsed();
    let duration_ms = elapsed.as_millis() as u64;

    metrics::histogram!("skillroute_classifier_duration_seconds", "model" => model.clone())
        .record(elapsed.as_secs_f64());

    match result {
        Ok(decision) => {
            tracing::debug!(
                model = %model,
                duration_ms,
                selected = ?decision.selected_skills,
                mode = ?decision.mode,
                confidence = decision.confidence,
                "Classifier call succeeded"
            );
            ClassifierOutcome {
                decision: Some(decision),
                attempted: true,
                succeeded: true,
                duration_ms,
                model: Some(model),
            }
        }
        Err(e) => {
            metrics::counter!(
                "skillroute_classifier_failures_total",
                "kind" => e.kind(),
            )
            .increment(1);
            tracing::warn!(
                model = %model,
                duration_ms,
                kind = e.kind(),
                error = %e,
                "Classifier call failed, falling back to deterministic routing"
            );
            ClassifierOutcome {
                decision: None,
                attempted: true,
                succeeded: false,
                duration_ms,
                model: Some(model),
            }
        }
    }
}
