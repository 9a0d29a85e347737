//! Agent routing
//!
//! Maps the final skill selection onto downstream agents. Pure function, no
//! I/O: explicit mentions win outright, otherwise agents are ranked by
//! overlap with the selected skills.

use serde::{Deserialize, Serialize};

/// Default number of agents returned by [`route_to_agents`].
pub const DEFAULT_MAX_AGENTS: usize = 2;

/// Score an agent must exceed to be returned alongside others.
pub const AGENT_SCORE_THRESHOLD: f64 = 0.5;

/// Flat score for generalists and for agents scored against an empty selection.
pub const BASELINE_AGENT_SCORE: f64 = 0.3;

const COVERAGE_BONUS: f64 = 0.01;
const COVERAGE_SCALE: f64 = 20.0;

/// A downstream handler. An agent with no skills is a generalist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl AgentDef {
    pub fn is_generalist(&self) -> bool {
        self.skills.is_empty()
    }

    fn is_mentioned_in(&self, lowered_prompt: &str) -> bool {
        let name = self.name.trim().to_lowercase();
        let id = self.id.trim().to_lowercase();
        (!name.is_empty() && lowered_prompt.contains(&name))
            || (!id.is_empty()
                && (lowered_prompt.contains(&id) || lowered_prompt.contains(&format!("@{}", id))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRouteResult {
    pub agent: AgentDef,
    pub score: f64,
    pub reason: String,
}

fn score_agent(agent: &AgentDef, selected_skills: &[String]) -> (f64, String) {
    if agent.is_generalist() {
        return (BASELINE_AGENT_SCORE, "generalist".to_string());
    }

    let overlap = agent
        .skills
        .iter()
        .filter(|s| selected_skills.contains(s))
        .count();

    if overlap == 0 {
        if selected_skills.is_empty() {
            return (BASELINE_AGENT_SCORE, "no skills selected".to_string());
        }
        return (0.0, "no skill overlap".to_string());
    }

    let coverage = COVERAGE_BONUS * (agent.skills.len() as f64 / COVERAGE_SCALE);
    let score = overlap as f64 / selected_skills.len() as f64 + coverage;
    (
        score,
        format!("{}/{} selected skills", overlap, selected_skills.len()),
    )
}

/// Pick the agents that should handle a request.
///
/// Never empty when `agents` is non-empty: when no agent clears
/// [`AGENT_SCORE_THRESHOLD`] the single top-ranked agent is returned.
/// `max_agents` is floored at 1.
pub fn route_to_agents(
    agents: &[AgentDef],
    selected_skills: &[String],
    prompt: &str,
    max_agents: usize,
) -> Vec<AgentRouteResult> {
    match agents {
        [] => return Vec::new(),
        [only] => {
            return vec![AgentRouteResult {
                agent: only.clone(),
                score: 1.0,
                reason: "single agent".to_string(),
            }]
        }
        _ => {}
    }

    let lowered = prompt.to_lowercase();
    if let Some(agent) = agents.iter().find(|a| a.is_mentioned_in(&lowered)) {
        tracing::debug!(agent = %agent.id, "Agent explicitly mentioned");
        return vec![AgentRouteResult {
            agent: agent.clone(),
            score: 1.0,
            reason: "explicit mention".to_string(),
        }];
    }

    let mut ranked: Vec<AgentRouteResult> = agents
        .iter()
        .map(|agent| {
            let (score, reason) = score_agent(agent, selected_skills);
            AgentRouteResult {
                agent: agent.clone(),
                score,
                reason,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.agent.skills.len().cmp(&a.agent.skills.len()))
    });

    let cleared: Vec<AgentRouteResult> = ranked
        .iter()
        .filter(|r| r.score > AGENT_SCORE_THRESHOLD)
        .take(max_agents.max(1))
        .cloned()
        .collect();

    let results = if cleared.is_empty() {
        ranked.into_iter().take(1).collect()
    } else {
        cleared
    };

    tracing::debug!(
        agents = ?results.iter().map(|r| r.agent.id.as_str()).collect::<Vec<_>>(),
        "Agents routed"
    );

    results
}
