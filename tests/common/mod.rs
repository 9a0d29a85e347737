//! Shared test utilities for skillroute integration tests.
//!
//! Provides classifier doubles, skill/tool/agent builders and a ready-made
//! sports catalog so individual test files stay focused on behavior.

#![allow(dead_code)]

use async_trait::async_trait;
use skillroute::agents::AgentDef;
use skillroute::catalog::ToolSpec;
use skillroute::classifier::{ClassifierCall, ClassifierError, ModelClassifier};
use skillroute::config::RoutingConfig;
use skillroute::routing::{RoutingTables, SkillRouter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Classifier Doubles
// =============================================================================

/// Classifier that always answers with the same text and records every call.
pub struct StaticClassifier {
    model: String,
    reply: String,
    calls: Mutex<Vec<ClassifierCall>>,
}

impl StaticClassifier {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            model: "static-model".to_string(),
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Reply with a well-formed decision object.
    pub fn deciding(skills: &[&str], mode: &str, confidence: f64, reason: &str) -> Arc<Self> {
        let reply = serde_json::json!({
            "selected_skills": skills,
            "mode": mode,
            "confidence": confidence,
            "reason": reason,
        });
        Self::new(&reply.to_string())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<ClassifierCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelClassifier for StaticClassifier {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, call: &ClassifierCall) -> Result<String, ClassifierError> {
        self.calls.lock().unwrap().push(call.clone());
        Ok(self.reply.clone())
    }
}

/// Classifier whose every call fails with a network error.
pub struct FailingClassifier {
    calls: AtomicUsize,
}

impl FailingClassifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClassifier for FailingClassifier {
    fn model_id(&self) -> &str {
        "failing-model"
    }

    async fn complete(&self, _call: &ClassifierCall) -> Result<String, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::Network("connection refused".to_string()))
    }
}

/// Classifier that never answers; only a deadline ends the call.
pub struct HangingClassifier;

#[async_trait]
impl ModelClassifier for HangingClassifier {
    fn model_id(&self) -> &str {
        "hanging-model"
    }

    async fn complete(&self, _call: &ClassifierCall) -> Result<String, ClassifierError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("{}".to_string())
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn skills(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn tool(name: &str) -> ToolSpec {
    ToolSpec {
        name: name.to_string(),
        description: String::new(),
        input_schema: serde_json::json!({"type": "object"}),
    }
}

pub fn agent(id: &str, name: &str, agent_skills: &[&str]) -> AgentDef {
    AgentDef {
        id: id.to_string(),
        name: name.to_string(),
        skills: skills(agent_skills),
    }
}

/// Installed skills of a typical sports deployment, helpers included.
pub fn sports_skills() -> Vec<String> {
    skills(&[
        "nfl",
        "nba",
        "nhl",
        "mlb",
        "soccer",
        "news",
        "betting",
        "kalshi",
        "polymarket",
        "markets",
    ])
}

pub fn sports_tools() -> Vec<ToolSpec> {
    vec![
        tool("nfl_get_scoreboard"),
        tool("nfl_get_depth_chart"),
        tool("nba_get_standings"),
        tool("nba_get_box_score"),
        tool("nhl_get_schedule"),
        tool("mlb_get_pitching_matchups"),
        tool("soccer_get_fixtures"),
        tool("news_search_headlines"),
        tool("kalshi_get_markets"),
    ]
}

/// Router with default configuration and tables, no classifier.
pub fn default_router() -> SkillRouter {
    SkillRouter::new(RoutingConfig::default(), RoutingTables::default())
}

pub fn router_with(config: RoutingConfig) -> SkillRouter {
    SkillRouter::new(config, RoutingTables::default())
}

pub const MEMORY_WITH_PROFILE: &str = "\
# Memory

User prefers short answers.

## Fan Profile
- Lifelong hockey fan, never misses the Stanley Cup playoffs
- Follows the NBA casually

## Reminders
- Baseball tickets on Friday
";
