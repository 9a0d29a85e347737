//! Routing decision types
//!
//! Final output of the skill router. Everything here serializes to the JSON
//! shape callers consume (`selectedSkills`, `llmDurationMs`, ...).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How broadly the router commits to a skill set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    /// Commit to a minimal skill set (one skill plus spillover)
    Focused,
    /// Allow up to the configured maximum number of skills
    #[default]
    Ambiguous,
}

impl FromStr for RouteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focused" => Ok(RouteMode::Focused),
            "ambiguous" => Ok(RouteMode::Ambiguous),
            _ => Err(format!("Unknown route mode: {}", s)),
        }
    }
}

impl std::fmt::Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteMode::Focused => write!(f, "focused"),
            RouteMode::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Which signal produced the primary skill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Skills named (or aliased) in the prompt
    Explicit,
    /// The model classifier's selection
    Model,
    /// Highest deterministic score without an explicit mention
    Deterministic,
    /// Fan Profile memory affinity
    Memory,
    /// No signal produced a primary skill
    Empty,
    /// No skills were installed
    NoSkills,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Explicit => "explicit",
            DecisionSource::Model => "model",
            DecisionSource::Deterministic => "deterministic",
            DecisionSource::Memory => "memory",
            DecisionSource::Empty => "empty",
            DecisionSource::NoSkills => "no_skills",
        }
    }
}

/// The skills allowed to handle a request, and how sure the router is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDecision {
    /// Insertion order is priority order; primary skills first, then helpers
    pub selected_skills: Vec<String>,
    pub mode: RouteMode,
    /// Always within [0, 1]
    pub confidence: f64,
    pub reason: String,
}

/// Observability record for one routing call. Never affects the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Classifier model id when a call was attempted
    pub model_used: Option<String>,
    pub llm_attempted: bool,
    pub llm_succeeded: bool,
    pub llm_duration_ms: u64,
    /// Signal that produced the primary skill list
    pub source: DecisionSource,
}

impl RouteMeta {
    /// Meta for a call that never reached the classifier.
    pub fn not_attempted(source: DecisionSource) -> Self {
        Self {
            model_used: None,
            llm_attempted: false,
            llm_succeeded: false,
            llm_duration_ms: 0,
            source,
        }
    }
}

/// Sole return value of the skill router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    pub decision: RouteDecision,
    pub meta: RouteMeta,
}

/// Clamp a confidence into [0, 1]; NaN becomes 0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
