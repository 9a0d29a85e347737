//! Route command implementation

use reqwest::Client;
use std::sync::Arc;

use crate::agents::route_to_agents;
use crate::catalog::Catalog;
use crate::classifier::create_classifier;
use crate::cli::output::{format_route_json, format_route_table, RouteView};
use crate::cli::RouteArgs;
use crate::config::SkillrouteConfig;
use crate::routing::{RouteRequest, SkillRouter};

/// Handle `skillroute route`
///
/// Runs the skill router on the prompt, then routes the selected skills to
/// the catalog's agents.
pub async fn handle_route(
    args: &RouteArgs,
    config: &SkillrouteConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&args.catalog)?;

    let memory = match &args.memory {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            format!("Failed to read memory file {}: {}", path.display(), e)
        })?),
        None => None,
    };

    let classifier = if args.no_classifier {
        None
    } else {
        create_classifier(&config.classifier, Arc::new(Client::new()))?
    };

    let router = SkillRouter::from_config(config, classifier);
    let request = RouteRequest::new(&args.prompt, &catalog.skills)
        .with_tools(&catalog.tools)
        .with_memory(memory.as_deref())
        .with_recent_context(args.context.as_deref());

    let outcome = router.route(&request).await;
    let agents = route_to_agents(
        &catalog.agents,
        &outcome.decision.selected_skills,
        &args.prompt,
        args.max_agents,
    );

    let view = RouteView { outcome, agents };

    if args.json {
        Ok(format_route_json(&view)?)
    } else {
        Ok(format_route_table(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const CATALOG: &str = r#"
        skills = ["nfl", "nba", "kalshi", "polymarket", "markets"]

        [[tools]]
        name = "nba_get_standings"

        [[agents]]
        id = "pro"
        name = "Pro Leagues"
        skills = ["nfl", "nba"]

        [[agents]]
        id = "markets"
        name = "Market Desk"
        skills = ["kalshi", "polymarket", "markets"]
    "#;

    fn write_catalog(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG).unwrap();
        path
    }

    fn args(prompt: &str, catalog: PathBuf) -> RouteArgs {
        RouteArgs {
            prompt: prompt.to_string(),
            catalog,
            config: None,
            memory: None,
            context: None,
            max_agents: 2,
            no_classifier: true,
            json: true,
        }
    }

    #[tokio::test]
    async fn test_route_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let args = args("super bowl odds", write_catalog(&dir));

        let output = handle_route(&args, &SkillrouteConfig::default())
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["decision"]["mode"], "focused");
        assert_eq!(
            parsed["decision"]["selectedSkills"],
            serde_json::json!(["nfl", "kalshi", "polymarket", "markets"])
        );
        assert_eq!(parsed["meta"]["llmAttempted"], false);
        assert_eq!(parsed["agents"][0]["agent"]["id"], "markets");
    }

    #[tokio::test]
    async fn test_route_with_memory_file() {
        let dir = tempfile::tempdir().unwrap();
        let memory = dir.path().join("memory.md");
        std::fs::write(&memory, "## Fan Profile\nbasketball every night\n").unwrap();

        let mut args = args("anything on tonight?", write_catalog(&dir));
        args.memory = Some(memory);

        let output = handle_route(&args, &SkillrouteConfig::default())
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["decision"]["selectedSkills"], serde_json::json!(["nba"]));
        assert_eq!(parsed["meta"]["source"], "memory");
        assert_eq!(parsed["agents"][0]["agent"]["id"], "pro");
    }

    #[tokio::test]
    async fn test_route_missing_memory_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args("nfl", write_catalog(&dir));
        args.memory = Some(dir.path().join("missing.md"));

        let result = handle_route(&args, &SkillrouteConfig::default()).await;
        assert!(result.unwrap_err().to_string().contains("memory file"));
    }
}
