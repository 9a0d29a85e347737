//! Routing configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::error::ConfigError;

/// Spillover policy for focused routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Focused decisions may admit `allow_spillover` extra skills
    #[default]
    SoftLock,
    /// Focused decisions keep exactly one primary skill
    Strict,
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "soft_lock" => Ok(RoutingMode::SoftLock),
            "strict" => Ok(RoutingMode::Strict),
            _ => Err(format!("Unknown routing mode: {}", s)),
        }
    }
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingMode::SoftLock => write!(f, "soft_lock"),
            RoutingMode::Strict => write!(f, "strict"),
        }
    }
}

/// Token budgets per pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenBudgets {
    /// Maximum output tokens for the classification call
    pub router: u32,
}

impl Default for TokenBudgets {
    fn default() -> Self {
        Self { router: 512 }
    }
}

/// Routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub mode: RoutingMode,
    /// Cap on primary skills in ambiguous mode
    pub max_skills: usize,
    /// Extra skills admitted in focused mode under `soft_lock`
    pub allow_spillover: usize,
    /// Caller's overall thinking budget; the classifier gets a sixteenth of it
    pub thinking_budget: u32,
    pub token_budgets: TokenBudgets,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: RoutingMode::SoftLock,
            max_skills: 2,
            allow_spillover: 1,
            thinking_budget: 8192,
            token_budgets: TokenBudgets::default(),
        }
    }
}

impl RoutingConfig {
    /// Spillover in effect: the configured value under `soft_lock`, else 0.
    pub fn effective_spillover(&self) -> usize {
        match self.mode {
            RoutingMode::SoftLock => self.allow_spillover,
            RoutingMode::Strict => 0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_skills == 0 {
            return Err(ConfigError::Validation {
                field: "routing.max_skills".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.token_budgets.router == 0 {
            return Err(ConfigError::Validation {
                field: "routing.token_budgets.router".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
