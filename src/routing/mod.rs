//! Skill routing
//!
//! Decides, for one incoming request, which installed skills may handle it.
//! The pipeline is a fixed sequence of pure stages around a single optional
//! model call:
//!
//! `normalize → score → rank memory → infer helpers → classify → merge → bound`
//!
//! Routing is total: every input yields a valid [`RouteOutcome`]. Classifier
//! failures degrade to the deterministic and memory signals.

pub mod decision;
pub mod helpers;
pub mod memory;
pub mod merge;
pub mod scoring;
pub mod tables;
pub mod text;

pub use decision::{DecisionSource, RouteDecision, RouteMeta, RouteMode, RouteOutcome};
pub use helpers::infer_helper_skills;
pub use memory::{extract_fan_profile, rank_memory_affinity};
pub use scoring::{score_skills, tool_vocabulary, SkillScores};
pub use tables::{same_skill, CoActivationRule, HelperRule, RoutingTables};
pub use text::{count_word_hits, normalize};

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::ToolSpec;
use crate::classifier::{
    classify, ClassifierOutcome, ClassifierRequest, ClassifierSettings, ModelClassifier, MAX_HINTS,
};
use crate::config::{ClassifierConfig, RoutingConfig, SkillrouteConfig};
use merge::MergeInputs;

/// Reason returned when nothing is installed.
pub const NO_SKILLS_REASON: &str = "no skills installed";

/// Everything one routing call reads. All borrowed, nothing fetched.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub prompt: &'a str,
    /// Installed skills in discovery order
    pub installed_skills: &'a [String],
    /// Registered tools, mined for vocabulary only
    pub tools: &'a [ToolSpec],
    /// Long-term memory block, possibly containing a Fan Profile section
    pub memory: Option<&'a str>,
    /// Caller-summarized prior turns
    pub recent_context: Option<&'a str>,
}

impl<'a> RouteRequest<'a> {
    pub fn new(prompt: &'a str, installed_skills: &'a [String]) -> Self {
        Self {
            prompt,
            installed_skills,
            tools: &[],
            memory: None,
            recent_context: None,
        }
    }

    pub fn with_tools(mut self, tools: &'a [ToolSpec]) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_memory(mut self, memory: Option<&'a str>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_recent_context(mut self, recent_context: Option<&'a str>) -> Self {
        self.recent_context = recent_context;
        self
    }
}

/// Skill router. Holds only immutable configuration, so one instance can
/// serve any number of concurrent requests.
pub struct SkillRouter {
    config: RoutingConfig,
    tables: RoutingTables,
    classifier: Option<Arc<dyn ModelClassifier>>,
    timeout: Duration,
    provider_options: Option<Value>,
}

impl SkillRouter {
    /// Router without a classifier: deterministic and memory signals only.
    pub fn new(config: RoutingConfig, tables: RoutingTables) -> Self {
        let classifier_defaults = ClassifierConfig::default();
        Self {
            config,
            tables,
            classifier: None,
            timeout: classifier_defaults.timeout(),
            provider_options: None,
        }
    }

    /// Router built from the full configuration, with an optional classifier.
    pub fn from_config(
        config: &SkillrouteConfig,
        classifier: Option<Arc<dyn ModelClassifier>>,
    ) -> Self {
        Self {
            config: config.routing.clone(),
            tables: RoutingTables::from_config(&config.tables),
            classifier,
            timeout: config.classifier.timeout(),
            provider_options: config.classifier.provider_options.clone(),
        }
    }

    /// Attach a classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn ModelClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_provider_options(mut self, provider_options: Option<Value>) -> Self {
        self.provider_options = provider_options;
        self
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    pub fn tables(&self) -> &RoutingTables {
        &self.tables
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    fn settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            thinking_budget: self.config.thinking_budget,
            max_output_tokens: self.config.token_budgets.router,
            timeout: self.timeout,
            provider_options: self.provider_options.clone(),
        }
    }

    /// Route one request.
    pub async fn route(&self, request: &RouteRequest<'_>) -> RouteOutcome {
        let start = Instant::now();

        if request.installed_skills.is_empty() {
            tracing::debug!("No skills installed, skipping routing");
            return self.finish(
                RouteDecision {
                    selected_skills: Vec::new(),
                    mode: RouteMode::Ambiguous,
                    confidence: 0.0,
                    reason: NO_SKILLS_REASON.to_string(),
                },
                RouteMeta::not_attempted(DecisionSource::NoSkills),
                start,
            );
        }

        let installed = request.installed_skills;
        let prompt = normalize(request.prompt);

        let scores = score_skills(&prompt, installed, request.tools, &self.tables);
        tracing::debug!(
            explicit = ?scores.explicit(),
            top = ?scores.top_candidate(),
            "Deterministic scoring complete"
        );

        let memory = rank_memory_affinity(request.memory, installed, &self.tables);
        tracing::debug!(ranked = ?memory, "Memory affinity ranked");

        let helpers = infer_helper_skills(&prompt, installed, &self.tables);
        tracing::debug!(helpers = ?helpers, "Helper skills inferred");

        let outcome = match &self.classifier {
            Some(classifier) => {
                let allowed: Vec<String> = installed
                    .iter()
                    .filter(|s| !self.tables.is_helper(s))
                    .cloned()
                    .collect();
                let deterministic_hints: Vec<(String, f64)> = scores
                    .ranked()
                    .into_iter()
                    .filter(|(_, score)| *score > 0.0)
                    .take(MAX_HINTS)
                    .collect();
                let memory_hints: Vec<(String, usize)> =
                    memory.iter().take(MAX_HINTS).cloned().collect();

                let classifier_request = ClassifierRequest {
                    allowed_skills: &allowed,
                    deterministic_hints: &deterministic_hints,
                    memory_hints: &memory_hints,
                    recent_context: request.recent_context,
                    prompt: request.prompt,
                };
                classify(classifier.as_ref(), &classifier_request, &self.settings()).await
            }
            None => ClassifierOutcome::skipped(),
        };

        let (decision, source) = merge::merge(&MergeInputs {
            installed,
            scores: &scores,
            memory: &memory,
            helpers: &helpers,
            model: outcome.decision.as_ref(),
            config: &self.config,
            tables: &self.tables,
        });

        let meta = RouteMeta {
            model_used: outcome.model,
            llm_attempted: outcome.attempted,
            llm_succeeded: outcome.succeeded,
            llm_duration_ms: outcome.duration_ms,
            source,
        };

        self.finish(decision, meta, start)
    }

    fn finish(&self, decision: RouteDecision, meta: RouteMeta, start: Instant) -> RouteOutcome {
        metrics::counter!(
            "skillroute_route_decisions_total",
            "mode" => decision.mode.to_string(),
            "source" => meta.source.as_str(),
        )
        .increment(1);

        tracing::info!(
            selected = ?decision.selected_skills,
            mode = %decision.mode,
            confidence = decision.confidence,
            source = meta.source.as_str(),
            llm_attempted = meta.llm_attempted,
            llm_succeeded = meta.llm_succeeded,
            "Route decided"
        );
        tracing::trace!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "Routing pipeline completed"
        );

        RouteOutcome { decision, meta }
    }
}
