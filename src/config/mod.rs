//! Configuration module for skillroute
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SKILLROUTE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use skillroute::config::SkillrouteConfig;
//!
//! // Load defaults
//! let config = SkillrouteConfig::default();
//! assert_eq!(config.routing.max_skills, 2);
//!
//! // Parse from TOML
//! let toml = r#"
//! [routing]
//! max_skills = 3
//! "#;
//! let config: SkillrouteConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.routing.max_skills, 3);
//! ```

pub mod classifier;
pub mod error;
pub mod logging;
pub mod routing;
pub mod tables;

pub use classifier::{ClassifierConfig, ClassifierProvider};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use routing::{RoutingConfig, RoutingMode, TokenBudgets};
pub use tables::TablesConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the skill router.
///
/// # Example
///
/// ```rust
/// use skillroute::config::{RoutingMode, SkillrouteConfig};
///
/// let config = SkillrouteConfig::default();
/// assert_eq!(config.routing.mode, RoutingMode::SoftLock);
/// assert!(!config.classifier.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SkillrouteConfig {
    /// Mode, caps and budgets for skill routing
    pub routing: RoutingConfig,
    /// Model classifier endpoint
    pub classifier: ClassifierConfig,
    /// Additions to the built-in alias, stop-word and helper tables
    pub tables: TablesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SkillrouteConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: p.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports SKILLROUTE_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Routing settings
        if let Ok(mode) = std::env::var("SKILLROUTE_ROUTING_MODE") {
            if let Ok(m) = mode.parse() {
                self.routing.mode = m;
            }
        }
        if let Ok(max) = std::env::var("SKILLROUTE_MAX_SKILLS") {
            if let Ok(m) = max.parse() {
                self.routing.max_skills = m;
            }
        }
        if let Ok(spillover) = std::env::var("SKILLROUTE_ALLOW_SPILLOVER") {
            if let Ok(s) = spillover.parse() {
                self.routing.allow_spillover = s;
            }
        }
        if let Ok(budget) = std::env::var("SKILLROUTE_THINKING_BUDGET") {
            if let Ok(b) = budget.parse() {
                self.routing.thinking_budget = b;
            }
        }

        // Classifier settings
        if let Ok(model) = std::env::var("SKILLROUTE_CLASSIFIER_MODEL") {
            if !model.trim().is_empty() {
                self.classifier.model = model;
            }
        }
        if let Ok(timeout) = std::env::var("SKILLROUTE_CLASSIFIER_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.classifier.timeout_ms = t;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("SKILLROUTE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SKILLROUTE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routing.validate()?;

        if self.classifier.timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "classifier.timeout_ms".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.classifier.enabled && self.classifier.model.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "classifier.model".to_string(),
                message: "model cannot be empty when the classifier is enabled".to_string(),
            });
        }

        self.tables.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_defaults() {
        let config = SkillrouteConfig::default();
        assert_eq!(config.routing.max_skills, 2);
        assert_eq!(config.routing.allow_spillover, 1);
        assert!(!config.classifier.enabled);
        assert!(config.tables.aliases.is_empty());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [routing]
        mode = "strict"
        "#;

        let config: SkillrouteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.mode, RoutingMode::Strict);
        assert_eq!(config.routing.max_skills, 2); // Default
    }

    #[test]
    fn test_config_parse_example_toml() {
        let toml = include_str!("../../skillroute.example.toml");
        let config: SkillrouteConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.routing.max_skills >= 1);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[routing]\nmax_skills = 4").unwrap();

        let config = SkillrouteConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.routing.max_skills, 4);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[routing\nmax_skills = ").unwrap();

        let result = SkillrouteConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = SkillrouteConfig::load(Some(Path::new("/nonexistent/skillroute.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = SkillrouteConfig::load(None).unwrap();
        assert_eq!(config, SkillrouteConfig::default());
    }

    // Env override tests use distinct variables so they can run in parallel.

    #[test]
    fn test_config_env_override_max_skills() {
        std::env::set_var("SKILLROUTE_MAX_SKILLS", "5");
        let config = SkillrouteConfig::default().with_env_overrides();
        std::env::remove_var("SKILLROUTE_MAX_SKILLS");

        assert_eq!(config.routing.max_skills, 5);
    }

    #[test]
    fn test_config_env_override_routing_mode() {
        std::env::set_var("SKILLROUTE_ROUTING_MODE", "strict");
        let config = SkillrouteConfig::default().with_env_overrides();
        std::env::remove_var("SKILLROUTE_ROUTING_MODE");

        assert_eq!(config.routing.mode, RoutingMode::Strict);
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        std::env::set_var("SKILLROUTE_ALLOW_SPILLOVER", "lots");
        let config = SkillrouteConfig::default().with_env_overrides();
        std::env::remove_var("SKILLROUTE_ALLOW_SPILLOVER");

        // Should keep default, not crash
        assert_eq!(config.routing.allow_spillover, 1);
    }

    #[test]
    fn test_config_env_override_classifier_model() {
        std::env::set_var("SKILLROUTE_CLASSIFIER_MODEL", "claude-3-5-haiku-latest");
        let config = SkillrouteConfig::default().with_env_overrides();
        std::env::remove_var("SKILLROUTE_CLASSIFIER_MODEL");

        assert_eq!(config.classifier.model, "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("SKILLROUTE_LOG_FORMAT", "json");
        let config = SkillrouteConfig::default().with_env_overrides();
        std::env::remove_var("SKILLROUTE_LOG_FORMAT");

        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_validation_checks_log_level() {
        let mut config = SkillrouteConfig::default();
        config.logging.level = "chatty".to_string();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = SkillrouteConfig::default();
        config.classifier.timeout_ms = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "classifier.timeout_ms"
        ));
    }

    #[test]
    fn test_config_validation_enabled_classifier_needs_model() {
        let mut config = SkillrouteConfig::default();
        config.classifier.enabled = true;
        config.classifier.model = " ".to_string();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "classifier.model"
        ));
    }

    #[test]
    fn test_config_validation_zero_max_skills() {
        let mut config = SkillrouteConfig::default();
        config.routing.max_skills = 0;
        assert!(config.validate().is_err());
    }
}
