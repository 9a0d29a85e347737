//! Installed-skill catalog
//!
//! A catalog file describes what the host has installed: skill names, the
//! flat tool registry (used only for vocabulary mining) and the downstream
//! agents. TOML and JSON are both accepted, picked by file extension.
//!
//! ```toml
//! skills = ["nfl", "nba", "kalshi"]
//!
//! [[tools]]
//! name = "nfl_get_scoreboard"
//! description = "Live NFL scores"
//!
//! [[agents]]
//! id = "pro"
//! name = "Pro Leagues"
//! skills = ["nfl", "nba"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::agents::AgentDef;

/// A registered tool. Only `name` matters for routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Conventionally `<skill>_<action>`
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Installed skills in discovery order
    pub skills: Vec<String>,
    pub tools: Vec<ToolSpec>,
    pub agents: Vec<AgentDef>,
}

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid catalog: {0}")]
    Validation(String),
}

impl Catalog {
    /// Load and validate a catalog from a `.toml` or `.json` file.
    ///
    /// Files with any other extension are parsed as TOML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            skills = catalog.skills.len(),
            tools = catalog.tools.len(),
            agents = catalog.agents.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject empty or duplicate skill names and agent ids.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.trim().is_empty() {
                return Err(CatalogError::Validation(
                    "skill names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(skill.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate skill '{}'",
                    skill
                )));
            }
        }

        let mut ids = HashSet::new();
        for agent in &self.agents {
            if agent.id.trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "agent '{}' has an empty id",
                    agent.name
                )));
            }
            if !ids.insert(agent.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate agent id '{}'",
                    agent.id
                )));
            }
        }

        Ok(())
    }
}
