//! Static routing tables: skill aliases, tool stop-words and helper triggers
//!
//! The built-in tables cover the sports and market-data skill domains. They
//! are plain data so a deployment can extend them from configuration (see
//! [`crate::config::TablesConfig`]) without touching the merge logic.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::TablesConfig;

/// Trigger phrases that activate one helper skill when it is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperRule {
    /// Helper skill activated by this rule
    pub skill: String,
    /// Whole-word phrases; any single hit activates the skill
    pub triggers: Vec<String>,
}

/// Conjunctive rule: activate `skill` when every skill in `requires` is already active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoActivationRule {
    pub skill: String,
    pub requires: Vec<String>,
}

/// Lookup tables consulted by the scorers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTables {
    /// Skill name → alias phrases that count as an explicit mention
    pub aliases: HashMap<String, Vec<String>>,
    /// Tool-name tokens that carry no routing signal
    pub stop_words: HashSet<String>,
    /// Keyword rules for helper skills, evaluated in order
    pub helpers: Vec<HelperRule>,
    /// Co-activation rules, evaluated after the keyword rules
    pub co_activations: Vec<CoActivationRule>,
}

fn phrases(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RoutingTables {
    fn default() -> Self {
        let aliases: HashMap<String, Vec<String>> = [
            ("nfl", &["football", "super bowl", "gridiron", "touchdown", "quarterback"][..]),
            ("nba", &["basketball", "nba finals"][..]),
            ("wnba", &["women's basketball"][..]),
            ("mlb", &["baseball", "world series", "home run"][..]),
            ("nhl", &["hockey", "stanley cup"][..]),
            ("cfb", &["college football", "ncaaf", "heisman"][..]),
            ("cbb", &["college basketball", "ncaab", "march madness", "final four"][..]),
            ("soccer", &["premier league", "epl", "champions league", "la liga", "mls", "fifa"][..]),
            ("f1", &["formula 1", "formula one", "grand prix"][..]),
            ("golf", &["pga", "pga tour", "masters tournament", "ryder cup"][..]),
            ("tennis", &["atp", "wta", "wimbledon", "us open tennis"][..]),
            ("ufc", &["mma", "octagon"][..]),
        ]
        .into_iter()
        .map(|(skill, list)| (skill.to_string(), phrases(list)))
        .collect();

        let stop_words = [
            "get", "list", "fetch", "search", "find", "lookup", "info", "data", "details", "detail",
            "the", "and", "for", "with", "all", "by", "id", "ids", "current", "latest", "api",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let helpers = vec![
            HelperRule {
                skill: "news".to_string(),
                triggers: phrases(&[
                    "news",
                    "headline",
                    "headlines",
                    "breaking",
                    "rumor",
                    "rumors",
                    "injury report",
                    "press conference",
                ]),
            },
            HelperRule {
                skill: "betting".to_string(),
                triggers: phrases(&[
                    "betting",
                    "kelly",
                    "kelly criterion",
                    "expected value",
                    "parlay",
                    "vig",
                    "juice",
                    "arbitrage",
                    "hedge",
                    "bankroll",
                    "implied probability",
                    "american odds",
                    "decimal odds",
                ]),
            },
            HelperRule {
                skill: "kalshi".to_string(),
                triggers: phrases(&[
                    "kalshi",
                    "odds",
                    "bet",
                    "bets",
                    "wager",
                    "prediction market",
                    "prediction markets",
                    "event contract",
                    "event contracts",
                ]),
            },
            HelperRule {
                skill: "polymarket".to_string(),
                triggers: phrases(&[
                    "polymarket",
                    "odds",
                    "bet",
                    "bets",
                    "wager",
                    "prediction market",
                    "prediction markets",
                ]),
            },
            HelperRule {
                skill: "markets".to_string(),
                triggers: phrases(&["compare markets", "market comparison", "cross-market"]),
            },
        ];

        let co_activations = vec![CoActivationRule {
            skill: "markets".to_string(),
            requires: vec!["kalshi".to_string(), "polymarket".to_string()],
        }];

        Self {
            aliases,
            stop_words,
            helpers,
            co_activations,
        }
    }
}

/// True when two skill ids name the same skill. Ids compare case-insensitively,
/// the same way prompt mentions do.
pub fn same_skill(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl RoutingTables {
    /// Built-in tables extended with the configured additions.
    pub fn from_config(config: &TablesConfig) -> Self {
        let mut tables = Self::default();
        tables.extend(config);
        tables
    }

    /// Merge configured additions into these tables. Existing entries are kept.
    pub fn extend(&mut self, config: &TablesConfig) {
        for (skill, extra) in &config.aliases {
            let entry = self.aliases.entry(skill.to_lowercase()).or_default();
            for alias in extra {
                let alias = alias.to_lowercase();
                if !entry.contains(&alias) {
                    entry.push(alias);
                }
            }
        }

        self.stop_words
            .extend(config.stop_words.iter().map(|w| w.to_lowercase()));

        for rule in &config.helpers {
            let rule = HelperRule {
                skill: rule.skill.to_lowercase(),
                triggers: rule.triggers.clone(),
            };
            match self.helpers.iter_mut().find(|h| h.skill == rule.skill) {
                Some(existing) => {
                    for trigger in &rule.triggers {
                        if !existing.triggers.contains(trigger) {
                            existing.triggers.push(trigger.clone());
                        }
                    }
                }
                None => self.helpers.push(rule),
            }
        }
    }

    /// Alias phrases configured for a skill (empty when none). Skill ids are
    /// matched case-insensitively.
    pub fn aliases_for(&self, skill: &str) -> &[String] {
        self.aliases
            .get(&skill.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when the skill is an auxiliary helper rather than a primary routing target.
    pub fn is_helper(&self, skill: &str) -> bool {
        self.helpers.iter().any(|h| same_skill(&h.skill, skill))
            || self.co_activations.iter().any(|c| same_skill(&c.skill, skill))
    }

    /// All helper skill names, keyword-driven and co-activated.
    pub fn helper_skills(&self) -> HashSet<&str> {
        self.helpers
            .iter()
            .map(|h| h.skill.as_str())
            .chain(self.co_activations.iter().map(|c| c.skill.as_str()))
            .collect()
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}
