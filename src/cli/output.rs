//! Output formatting helpers for CLI commands

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

use crate::agents::AgentRouteResult;
use crate::routing::{RouteMode, RouteOutcome};

/// View model for the `route` command
#[derive(Debug, Clone, Serialize)]
pub struct RouteView {
    #[serde(flatten)]
    pub outcome: RouteOutcome,
    pub agents: Vec<AgentRouteResult>,
}

/// View model for one installed skill
#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub name: String,
    pub helper: bool,
    pub aliases: Vec<String>,
    pub vocabulary: Vec<String>,
}

fn mode_cell(mode: RouteMode) -> String {
    match mode {
        RouteMode::Focused => "focused".green().to_string(),
        RouteMode::Ambiguous => "ambiguous".yellow().to_string(),
    }
}

fn none_if_empty(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Format a routing result as two tables: the decision, then the agents
pub fn format_route_table(view: &RouteView) -> String {
    let decision = &view.outcome.decision;
    let meta = &view.outcome.meta;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let classifier = match (&meta.model_used, meta.llm_attempted, meta.llm_succeeded) {
        (_, false, _) => "not called".dimmed().to_string(),
        (model, true, true) => format!(
            "{} {} ({}ms)",
            "✓".green(),
            model.as_deref().unwrap_or("unknown"),
            meta.llm_duration_ms
        ),
        (model, true, false) => format!(
            "{} {} ({}ms)",
            "✗".red(),
            model.as_deref().unwrap_or("unknown"),
            meta.llm_duration_ms
        ),
    };

    table.add_row(vec![
        Cell::new("Skills"),
        Cell::new(none_if_empty(&decision.selected_skills).bold().to_string()),
    ]);
    table.add_row(vec![Cell::new("Mode"), Cell::new(mode_cell(decision.mode))]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(format!("{:.2}", decision.confidence)),
    ]);
    table.add_row(vec![Cell::new("Reason"), Cell::new(&decision.reason)]);
    table.add_row(vec![Cell::new("Source"), Cell::new(meta.source.as_str())]);
    table.add_row(vec![Cell::new("Classifier"), Cell::new(classifier)]);

    let mut output = table.to_string();

    if !view.agents.is_empty() {
        let mut agents = Table::new();
        agents.load_preset(UTF8_FULL);
        agents.set_content_arrangement(ContentArrangement::Dynamic);
        agents.set_header(vec!["Agent", "Name", "Score", "Reason"]);
        for result in &view.agents {
            agents.add_row(vec![
                Cell::new(&result.agent.id),
                Cell::new(&result.agent.name),
                Cell::new(format!("{:.3}", result.score)),
                Cell::new(&result.reason),
            ]);
        }
        output.push('\n');
        output.push_str(&agents.to_string());
    }

    output
}

/// Format a routing result as JSON (`{decision, meta, agents}`)
pub fn format_route_json(view: &RouteView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

/// Format installed skills as a table
pub fn format_skills_table(skills: &[SkillView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Skill", "Kind", "Aliases", "Tool Vocabulary"]);

    for s in skills {
        let kind = if s.helper {
            "helper".cyan().to_string()
        } else {
            "primary".to_string()
        };
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(kind),
            Cell::new(none_if_empty(&s.aliases)),
            Cell::new(none_if_empty(&s.vocabulary)),
        ]);
    }

    table.to_string()
}

/// Format installed skills as JSON
pub fn format_skills_json(skills: &[SkillView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "skills": skills }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentDef;
    use crate::routing::{DecisionSource, RouteDecision, RouteMeta};

    fn create_test_view() -> RouteView {
        RouteView {
            outcome: RouteOutcome {
                decision: RouteDecision {
                    selected_skills: vec!["nfl".to_string(), "kalshi".to_string()],
                    mode: RouteMode::Focused,
                    confidence: 0.9,
                    reason: "explicit skill mention: nfl".to_string(),
                },
                meta: RouteMeta::not_attempted(DecisionSource::Explicit),
            },
            agents: vec![AgentRouteResult {
                agent: AgentDef {
                    id: "pro".to_string(),
                    name: "Pro Leagues".to_string(),
                    skills: vec!["nfl".to_string()],
                },
                score: 1.0,
                reason: "single agent".to_string(),
            }],
        }
    }

    #[test]
    fn test_route_table_contains_decision() {
        let output = format_route_table(&create_test_view());
        assert!(output.contains("nfl, kalshi"));
        assert!(output.contains("focused"));
        assert!(output.contains("0.90"));
        assert!(output.contains("Pro Leagues"));
    }

    #[test]
    fn test_route_json_shape() {
        let output = format_route_json(&create_test_view()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["decision"]["mode"], "focused");
        assert_eq!(parsed["decision"]["selectedSkills"][0], "nfl");
        assert_eq!(parsed["meta"]["llmAttempted"], false);
        assert_eq!(parsed["meta"]["source"], "explicit");
        assert_eq!(parsed["agents"][0]["agent"]["id"], "pro");
    }

    #[test]
    fn test_skills_table_marks_helpers() {
        let skills = vec![
            SkillView {
                name: "nfl".to_string(),
                helper: false,
                aliases: vec!["football".to_string()],
                vocabulary: vec![],
            },
            SkillView {
                name: "kalshi".to_string(),
                helper: true,
                aliases: vec![],
                vocabulary: vec!["markets".to_string()],
            },
        ];
        let output = format_skills_table(&skills);
        assert!(output.contains("football"));
        assert!(output.contains("helper"));
        assert!(output.contains("primary"));

        let json = format_skills_json(&skills).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["skills"][1]["helper"], true);
    }
}
