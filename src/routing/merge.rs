//! Decision merging and mode/spillover bounding
//!
//! Pure functions over immutable inputs:
//!
//! 1. [`baseline`] builds the pre-model decision from explicit mentions
//! 2. [`apply_model`] lets a valid model answer override mode, confidence and reason
//! 3. [`resolve_primary`] picks the primary skills: explicit lock, then model
//!    selection, then deterministic fallback, then memory fallback
//! 4. [`bound_primary`] truncates the primary list to the mode's cap
//! 5. [`merge`] appends helper skills (never truncated) and clamps confidence

use crate::classifier::ModelDecision;
use crate::config::RoutingConfig;
use crate::routing::decision::{clamp_confidence, DecisionSource, RouteDecision, RouteMode};
use crate::routing::scoring::SkillScores;
use crate::routing::tables::{same_skill, RoutingTables};

pub const EXPLICIT_CONFIDENCE: f64 = 0.9;
pub const NO_EXPLICIT_CONFIDENCE: f64 = 0.55;
pub const DETERMINISTIC_FLOOR: f64 = 0.65;
pub const MEMORY_FLOOR: f64 = 0.45;

/// Everything the merger reads, produced by the earlier pipeline stages.
#[derive(Debug, Clone, Copy)]
pub struct MergeInputs<'a> {
    pub installed: &'a [String],
    pub scores: &'a SkillScores,
    /// Memory-ranked skills, highest affinity first
    pub memory: &'a [(String, usize)],
    /// Helper skills triggered for this prompt
    pub helpers: &'a [String],
    /// Parsed model answer, when the call succeeded
    pub model: Option<&'a ModelDecision>,
    pub config: &'a RoutingConfig,
    pub tables: &'a RoutingTables,
}

/// Primary skill resolution before bounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub primary: Vec<String>,
    pub mode: RouteMode,
    pub confidence: f64,
    pub reason: String,
    pub source: DecisionSource,
}

/// Pre-model decision derived from explicit mentions alone.
pub fn baseline(scores: &SkillScores) -> RouteDecision {
    let explicit = scores.explicit();
    let (mode, confidence, reason) = if explicit.is_empty() {
        (
            RouteMode::Ambiguous,
            NO_EXPLICIT_CONFIDENCE,
            "no explicit skill mention".to_string(),
        )
    } else {
        let mode = if explicit.len() == 1 {
            RouteMode::Focused
        } else {
            RouteMode::Ambiguous
        };
        (
            mode,
            EXPLICIT_CONFIDENCE,
            format!("explicit skill mention: {}", explicit.join(", ")),
        )
    };

    RouteDecision {
        selected_skills: Vec::new(),
        mode,
        confidence,
        reason,
    }
}

/// Overlay a model answer on the baseline.
///
/// The model only counts when it selected at least one installed skill. Its
/// mode overrides the baseline only when valid, and its reason only when
/// non-empty. Model skill ids are matched to the installed ids ignoring case. The returned decision's `selected_skills` holds the model's
/// installed selection; it is a signal for [`resolve_primary`], not the
/// final list.
pub fn apply_model(
    baseline: RouteDecision,
    model: Option<&ModelDecision>,
    installed: &[String],
) -> RouteDecision {
    let Some(model) = model else {
        return baseline;
    };

    let mut selected: Vec<String> = Vec::new();
    for proposed in &model.selected_skills {
        if let Some(skill) = installed.iter().find(|s| same_skill(s, proposed)) {
            if !selected.contains(skill) {
                selected.push(skill.clone());
            }
        }
    }

    if selected.is_empty() {
        tracing::debug!(
            proposed = ?model.selected_skills,
            "Model selected no installed skill, keeping baseline"
        );
        return baseline;
    }

    RouteDecision {
        selected_skills: selected,
        mode: model.mode.unwrap_or(baseline.mode),
        confidence: model.confidence,
        reason: if model.reason.is_empty() {
            baseline.reason
        } else {
            model.reason.clone()
        },
    }
}

/// Pick the primary skill list in priority order.
pub fn resolve_primary(decision: RouteDecision, inputs: &MergeInputs<'_>) -> Resolution {
    let explicit = inputs.scores.explicit();
    if !explicit.is_empty() {
        // Explicit intent is never diluted by model or memory preference.
        return Resolution {
            primary: explicit.to_vec(),
            mode: decision.mode,
            confidence: decision.confidence,
            reason: decision.reason,
            source: DecisionSource::Explicit,
        };
    }

    let mut model_primary: Vec<String> = decision
        .selected_skills
        .iter()
        .filter(|s| !inputs.tables.is_helper(s))
        .cloned()
        .collect();
    if !model_primary.is_empty() {
        let spillover: Vec<String> = inputs
            .memory
            .iter()
            .map(|(skill, _)| skill)
            .filter(|skill| !model_primary.contains(skill))
            .take(inputs.config.effective_spillover())
            .cloned()
            .collect();
        model_primary.extend(spillover);

        return Resolution {
            primary: model_primary,
            mode: decision.mode,
            confidence: decision.confidence,
            reason: decision.reason,
            source: DecisionSource::Model,
        };
    }

    if let Some((skill, score)) = inputs.scores.top_candidate() {
        return Resolution {
            reason: format!("deterministic fallback: top-scored skill {} ({:.1})", skill, score),
            primary: vec![skill],
            mode: RouteMode::Focused,
            confidence: decision.confidence.max(DETERMINISTIC_FLOOR),
            source: DecisionSource::Deterministic,
        };
    }

    if !inputs.memory.is_empty() {
        let primary: Vec<String> = inputs
            .memory
            .iter()
            .take(inputs.config.max_skills.max(1))
            .map(|(skill, _)| skill.clone())
            .collect();
        return Resolution {
            reason: format!("memory affinity fallback: {}", primary.join(", ")),
            primary,
            mode: RouteMode::Ambiguous,
            confidence: decision.confidence.max(MEMORY_FLOOR),
            source: DecisionSource::Memory,
        };
    }

    Resolution {
        primary: Vec::new(),
        mode: decision.mode,
        confidence: decision.confidence,
        reason: decision.reason,
        source: DecisionSource::Empty,
    }
}

/// Primary-skill cap for a mode.
///
/// Focused: `1 + spillover` (spillover only under `soft_lock`).
/// Ambiguous: `max(1, max_skills)`.
pub fn skill_cap(mode: RouteMode, config: &RoutingConfig) -> usize {
    match mode {
        RouteMode::Focused => 1 + config.effective_spillover(),
        RouteMode::Ambiguous => config.max_skills.max(1),
    }
}

/// Truncate the primary list to the mode's cap, never erasing it entirely.
pub fn bound_primary(primary: &[String], mode: RouteMode, config: &RoutingConfig) -> Vec<String> {
    let cap = skill_cap(mode, config);
    let mut bounded: Vec<String> = primary.iter().take(cap).cloned().collect();
    if bounded.is_empty() {
        if let Some(first) = primary.first() {
            bounded.push(first.clone());
        }
    }
    bounded
}

/// Merge every signal into the final decision.
pub fn merge(inputs: &MergeInputs<'_>) -> (RouteDecision, DecisionSource) {
    let decision = apply_model(baseline(inputs.scores), inputs.model, inputs.installed);
    let resolution = resolve_primary(decision, inputs);
    let bounded = bound_primary(&resolution.primary, resolution.mode, inputs.config);

    if bounded.len() < resolution.primary.len() {
        tracing::debug!(
            mode = %resolution.mode,
            cap = skill_cap(resolution.mode, inputs.config),
            dropped = ?&resolution.primary[bounded.len()..],
            "Primary skills truncated"
        );
    }

    let mut selected = bounded;
    for helper in inputs.helpers {
        if !selected.contains(helper) {
            selected.push(helper.clone());
        }
    }

    (
        RouteDecision {
            selected_skills: selected,
            mode: resolution.mode,
            confidence: clamp_confidence(resolution.confidence),
            reason: resolution.reason,
        },
        resolution.source,
    )
}
