//! Property tests for routing invariants.

mod common;

use common::*;
use proptest::prelude::*;
use skillroute::agents::route_to_agents;
use skillroute::config::{RoutingConfig, RoutingMode};
use skillroute::routing::{RouteMode, RouteRequest, RoutingTables};

const VOCABULARY: &[&str] = &[
    "nfl", "nba", "nhl", "mlb", "soccer", "football", "hockey", "basketball", "super", "bowl",
    "odds", "bet", "news", "parlay", "kalshi", "polymarket", "standings", "depth", "chart",
    "tonight", "who", "won", "the", "game", "compare", "markets", "stanley", "cup",
];

fn prompt_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..12)
        .prop_map(|words| words.join(" "))
}

fn installed_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(sports_skills(), 0..=10)
}

fn config_strategy() -> impl Strategy<Value = RoutingConfig> {
    (any::<bool>(), 1usize..5, 0usize..4).prop_map(|(strict, max_skills, allow_spillover)| {
        RoutingConfig {
            mode: if strict {
                RoutingMode::Strict
            } else {
                RoutingMode::SoftLock
            },
            max_skills,
            allow_spillover,
            ..RoutingConfig::default()
        }
    })
}

/// Skill ids a model might answer with: installed, helper, unknown and oddly cased.
const MODEL_SKILLS: &[&str] = &[
    "nfl", "nba", "nhl", "mlb", "soccer", "news", "betting", "kalshi", "polymarket", "markets",
    "curling", "NFL", "Kalshi", "",
];

const MODEL_MODES: &[&str] = &["focused", "ambiguous", "narrow", ""];

/// Raw model replies: well-formed objects with arbitrary content, plus junk.
fn model_reply_strategy() -> impl Strategy<Value = String> {
    let decision = (
        proptest::collection::vec(proptest::sample::select(MODEL_SKILLS), 0..5),
        proptest::sample::select(MODEL_MODES),
        -2.0f64..3.0,
    )
        .prop_map(|(selected, mode, confidence)| {
            serde_json::json!({
                "selected_skills": selected,
                "mode": mode,
                "confidence": confidence,
                "reason": "model pick",
            })
            .to_string()
        });
    prop_oneof![
        4 => decision,
        1 => Just("not json at all".to_string()),
        1 => Just("{\"selected_skills\": [3, null, \"nba\"], \"confidence\": \"high\"}".to_string()),
    ]
}

fn route_blocking(
    config: RoutingConfig,
    prompt: &str,
    installed: &[String],
    memory: Option<&str>,
) -> skillroute::routing::RouteOutcome {
    route_blocking_with_model(config, prompt, installed, memory, None)
}

fn route_blocking_with_model(
    config: RoutingConfig,
    prompt: &str,
    installed: &[String],
    memory: Option<&str>,
    reply: Option<&str>,
) -> skillroute::routing::RouteOutcome {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let tools = sports_tools();
    let mut router = router_with(config);
    if let Some(reply) = reply {
        router = router.with_classifier(StaticClassifier::new(reply));
    }
    runtime.block_on(router.route(
        &RouteRequest::new(prompt, installed)
            .with_tools(&tools)
            .with_memory(memory),
    ))
}

proptest! {
    #[test]
    fn prop_confidence_in_unit_interval(
        prompt in prompt_strategy(),
        installed in installed_strategy(),
        config in config_strategy(),
    ) {
        let outcome = route_blocking(config, &prompt, &installed, Some(MEMORY_WITH_PROFILE));
        prop_assert!((0.0..=1.0).contains(&outcome.decision.confidence));
    }

    #[test]
    fn prop_selected_subset_of_installed(
        prompt in prompt_strategy(),
        installed in installed_strategy(),
        config in config_strategy(),
    ) {
        let outcome = route_blocking(config, &prompt, &installed, Some(MEMORY_WITH_PROFILE));
        for skill in &outcome.decision.selected_skills {
            prop_assert!(installed.contains(skill), "{} not installed", skill);
        }
    }

    #[test]
    fn prop_primary_skills_respect_cap(
        prompt in prompt_strategy(),
        installed in installed_strategy(),
        config in config_strategy(),
    ) {
        let outcome = route_blocking(config.clone(), &prompt, &installed, None);
        let tables = RoutingTables::default();
        let primary = outcome
            .decision
            .selected_skills
            .iter()
            .filter(|s| !tables.is_helper(s))
            .count();
        let cap = match outcome.decision.mode {
            RouteMode::Focused => 1 + config.effective_spillover(),
            RouteMode::Ambiguous => config.max_skills.max(1),
        };
        prop_assert!(primary <= cap);
    }

    #[test]
    fn prop_model_answers_keep_decision_invariants(
        prompt in prompt_strategy(),
        installed in installed_strategy(),
        config in config_strategy(),
        reply in model_reply_strategy(),
    ) {
        let outcome = route_blocking_with_model(
            config.clone(),
            &prompt,
            &installed,
            Some(MEMORY_WITH_PROFILE),
            Some(&reply),
        );
        let decision = &outcome.decision;
        prop_assert!((0.0..=1.0).contains(&decision.confidence));

        let tables = RoutingTables::default();
        let mut seen = std::collections::HashSet::new();
        let mut primary = 0;
        for skill in &decision.selected_skills {
            prop_assert!(installed.contains(skill), "{} not installed", skill);
            prop_assert!(seen.insert(skill.clone()), "{} selected twice", skill);
            if !tables.is_helper(skill) {
                primary += 1;
            }
        }
        let cap = match decision.mode {
            RouteMode::Focused => 1 + config.effective_spillover(),
            RouteMode::Ambiguous => config.max_skills.max(1),
        };
        prop_assert!(primary <= cap);
    }

    #[test]
    fn prop_selected_skills_are_distinct(
        prompt in prompt_strategy(),
        installed in installed_strategy(),
    ) {
        let outcome = route_blocking(RoutingConfig::default(), &prompt, &installed, Some(MEMORY_WITH_PROFILE));
        let mut seen = std::collections::HashSet::new();
        for skill in &outcome.decision.selected_skills {
            prop_assert!(seen.insert(skill.clone()));
        }
    }

    #[test]
    fn prop_agent_routing_never_empty_when_agents_exist(
        selected in proptest::sample::subsequence(sports_skills(), 0..=4),
        prompt in prompt_strategy(),
        max_agents in 0usize..4,
    ) {
        let agents = vec![
            agent("pro", "Pro Leagues", &["nfl", "nba", "nhl", "mlb"]),
            agent("markets", "Market Desk", &["kalshi", "polymarket"]),
            agent("general", "Generalist", &[]),
        ];
        let results = route_to_agents(&agents, &selected, &prompt, max_agents);
        prop_assert!(!results.is_empty());
        prop_assert!(results.len() <= max_agents.max(1));
    }
}
