//! Routing table extensions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::error::ConfigError;
use crate::routing::tables::HelperRule;

/// Additions merged into the built-in routing tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Skill → extra alias phrases
    pub aliases: HashMap<String, Vec<String>>,
    /// Extra tool-name stop-words
    pub stop_words: Vec<String>,
    /// Extra helper trigger rules (merged by skill name)
    pub helpers: Vec<HelperRule>,
}

impl TablesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (skill, aliases) in &self.aliases {
            if aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(ConfigError::Validation {
                    field: format!("tables.aliases.{}", skill),
                    message: "alias phrases cannot be empty".to_string(),
                });
            }
        }
        for (i, rule) in self.helpers.iter().enumerate() {
            if rule.skill.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("tables.helpers[{}].skill", i),
                    message: "skill cannot be empty".to_string(),
                });
            }
            if rule.triggers.is_empty() || rule.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigError::Validation {
                    field: format!("tables.helpers[{}].triggers", i),
                    message: "helper rules need at least one non-empty trigger".to_string(),
                });
            }
        }
        Ok(())
    }
}
