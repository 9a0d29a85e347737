//! Deterministic skill scoring
//!
//! Scores every installed, non-helper skill against the normalized prompt:
//!
//! - explicit name hit: +4 (marks the skill explicit)
//! - alias hits: +3 per hit, per alias phrase (marks the skill explicit)
//! - tool vocabulary: +0.4 per distinct vocabulary token present in the prompt

use crate::catalog::ToolSpec;
use crate::routing::tables::RoutingTables;
use crate::routing::text::{contains_word, count_word_hits};

pub const NAME_HIT_WEIGHT: f64 = 4.0;
pub const ALIAS_HIT_WEIGHT: f64 = 3.0;
pub const VOCAB_HIT_WEIGHT: f64 = 0.4;

/// Tokens shorter than this carry no routing signal.
const MIN_VOCAB_TOKEN_LEN: usize = 3;

/// Output of the deterministic scorer.
///
/// `scores` keeps discovery order (the order skills were installed), which is
/// also the tie-break order for [`SkillScores::ranked`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillScores {
    scores: Vec<(String, f64)>,
    explicit: Vec<String>,
}

impl SkillScores {
    /// Score of a skill, 0 when it was not scored.
    pub fn score(&self, skill: &str) -> f64 {
        self.scores
            .iter()
            .find(|(s, _)| s == skill)
            .map(|(_, score)| *score)
            .unwrap_or(0.0)
    }

    /// Explicitly mentioned skills in discovery order.
    pub fn explicit(&self) -> &[String] {
        &self.explicit
    }

    pub fn is_explicit(&self, skill: &str) -> bool {
        self.explicit.iter().any(|s| s == skill)
    }

    /// Skills sorted by descending score; ties keep discovery order.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Highest-scoring skill with a positive score, if any.
    pub fn top_candidate(&self) -> Option<(String, f64)> {
        self.ranked().into_iter().next().filter(|(_, score)| *score > 0.0)
    }

    /// Number of scored skills.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Vocabulary tokens mined from the names of a skill's tools.
///
/// A tool belongs to a skill when its name starts with `<skill>_`. The rest of
/// the name is split on `_`/`-`; short tokens and stop-words are dropped.
/// Tokens are distinct and keep first-seen order.
pub fn tool_vocabulary(skill: &str, tools: &[ToolSpec], tables: &RoutingTables) -> Vec<String> {
    let prefix = format!("{}_", skill.to_lowercase());
    let mut vocabulary: Vec<String> = Vec::new();

    for tool in tools {
        let name = tool.name.to_lowercase();
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };

        for token in rest.split(['_', '-']) {
            if token.len() < MIN_VOCAB_TOKEN_LEN || tables.is_stop_word(token) {
                continue;
            }
            if !vocabulary.iter().any(|t| t == token) {
                vocabulary.push(token.to_string());
            }
        }
    }

    vocabulary
}

/// Score every installed non-helper skill against an already-normalized prompt.
pub fn score_skills(
    normalized_prompt: &str,
    installed: &[String],
    tools: &[ToolSpec],
    tables: &RoutingTables,
) -> SkillScores {
    let mut scores: Vec<(String, f64)> = Vec::new();
    let mut explicit: Vec<String> = Vec::new();

    for skill in installed {
        if tables.is_helper(skill) || scores.iter().any(|(s, _)| s == skill) {
            continue;
        }

        let mut score = 0.0;
        let mut is_explicit = false;

        if contains_word(normalized_prompt, skill) {
            score += NAME_HIT_WEIGHT;
            is_explicit = true;
        }

        for alias in tables.aliases_for(skill) {
            let hits = count_word_hits(normalized_prompt, alias);
            if hits > 0 {
                score += ALIAS_HIT_WEIGHT * hits as f64;
                is_explicit = true;
            }
        }

        let vocab_hits = tool_vocabulary(skill, tools, tables)
            .iter()
            .filter(|token| contains_word(normalized_prompt, token))
            .count();
        score += VOCAB_HIT_WEIGHT * vocab_hits as f64;

        tracing::trace!(
            skill = %skill,
            score,
            explicit = is_explicit,
            vocab_hits,
            "Skill scored"
        );

        if is_explicit {
            explicit.push(skill.clone());
        }
        scores.push((skill.clone(), score));
    }

    SkillScores { scores, explicit }
}
