//! Skills command implementation

use crate::catalog::Catalog;
use crate::cli::output::{format_skills_json, format_skills_table, SkillView};
use crate::cli::SkillsArgs;
use crate::config::SkillrouteConfig;
use crate::routing::{tool_vocabulary, RoutingTables};

/// Handle `skillroute skills`
pub fn handle_skills(
    args: &SkillsArgs,
    config: &SkillrouteConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&args.catalog)?;
    let tables = RoutingTables::from_config(&config.tables);

    let skills: Vec<SkillView> = catalog
        .skills
        .iter()
        .map(|skill| SkillView {
            name: skill.clone(),
            helper: tables.is_helper(skill),
            aliases: tables.aliases_for(skill).to_vec(),
            vocabulary: tool_vocabulary(skill, &catalog.tools, &tables),
        })
        .collect();

    if args.json {
        Ok(format_skills_json(&skills)?)
    } else {
        Ok(format_skills_table(&skills))
    }
}
