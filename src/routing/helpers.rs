//! Helper-skill inference
//!
//! Helper skills (news, betting math, prediction markets) are auxiliary
//! context. They are activated by their own trigger phrases, independent of
//! the primary scorer, and are appended to the final selection outside the
//! primary skill cap.

use crate::routing::tables::{same_skill, RoutingTables};
use crate::routing::text::contains_word;

/// Infer the installed helper skills a normalized prompt activates.
///
/// Keyword rules run first, in table order. Co-activation rules then add
/// their skill when every required skill is already active; the rule is
/// conjunctive, so one of the required skills alone is not enough. Active
/// skills are reported with their installed spelling.
pub fn infer_helper_skills(
    normalized_prompt: &str,
    installed: &[String],
    tables: &RoutingTables,
) -> Vec<String> {
    let installed_as = |skill: &str| installed.iter().find(|s| same_skill(s, skill));
    let mut active: Vec<String> = Vec::new();
    let is_active = |active: &[String], skill: &str| active.iter().any(|a| same_skill(a, skill));

    for rule in &tables.helpers {
        let Some(skill) = installed_as(&rule.skill) else {
            continue;
        };
        if is_active(&active, skill) {
            continue;
        }
        if let Some(trigger) = rule
            .triggers
            .iter()
            .find(|t| contains_word(normalized_prompt, t))
        {
            tracing::trace!(skill = %skill, trigger = %trigger, "Helper skill triggered");
            active.push(skill.clone());
        }
    }

    for rule in &tables.co_activations {
        let Some(skill) = installed_as(&rule.skill) else {
            continue;
        };
        if is_active(&active, skill) {
            continue;
        }
        if !rule.requires.is_empty() && rule.requires.iter().all(|r| is_active(&active, r)) {
            tracing::trace!(skill = %skill, requires = ?rule.requires, "Helper skill co-activated");
            active.push(skill.clone());
        }
    }

    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::text::normalize;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn odds_activate_installed_market_skills() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("What are the odds the Chiefs win?"),
            &skills(&["nfl", "kalshi"]),
            &tables,
        );
        assert_eq!(active, vec!["kalshi".to_string()]);
    }

    #[test]
    fn uninstalled_helpers_never_activate() {
        let tables = RoutingTables::default();
        let active =
            infer_helper_skills(&normalize("breaking news and odds"), &skills(&["nfl"]), &tables);
        assert!(active.is_empty());
    }

    #[test]
    fn betting_math_activates_betting() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("size this with the Kelly criterion"),
            &skills(&["betting", "nba"]),
            &tables,
        );
        assert_eq!(active, vec!["betting".to_string()]);
    }

    #[test]
    fn markets_co_activates_when_both_prediction_markets_are_active() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("nfl odds"),
            &skills(&["nfl", "kalshi", "polymarket", "markets"]),
            &tables,
        );
        assert_eq!(active, vec!["kalshi", "polymarket", "markets"]);
    }

    #[test]
    fn markets_requires_both_prediction_markets() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("what does kalshi say"),
            &skills(&["kalshi", "polymarket", "markets"]),
            &tables,
        );
        assert_eq!(active, vec!["kalshi".to_string()]);
    }

    #[test]
    fn helpers_keep_installed_spelling() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("what are the odds"),
            &skills(&["NFL", "Kalshi", "Polymarket", "Markets"]),
            &tables,
        );
        assert_eq!(active, vec!["Kalshi", "Polymarket", "Markets"]);
    }

    #[test]
    fn markets_needs_both_installed_to_co_activate() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("nfl odds"),
            &skills(&["kalshi", "markets"]),
            &tables,
        );
        assert_eq!(active, vec!["kalshi".to_string()]);
    }

    #[test]
    fn news_keywords() {
        let tables = RoutingTables::default();
        let active = infer_helper_skills(
            &normalize("Any injury report for the Lakers?"),
            &skills(&["nba", "news"]),
            &tables,
        );
        assert_eq!(active, vec!["news".to_string()]);
    }
}
