//! `skillroute config init`: write the annotated starter config

use crate::cli::ConfigInitArgs;
use crate::config::SkillrouteConfig;
use std::fs;

const STARTER_CONFIG: &str = include_str!("../../skillroute.example.toml");

/// Write the starter config to `args.output`, creating missing parent
/// directories. An existing file is only replaced with `--force`.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists; pass --force to replace it",
            args.output.display()
        )
        .into());
    }

    let starter: SkillrouteConfig = toml::from_str(STARTER_CONFIG)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, STARTER_CONFIG)?;

    println!("✓ Wrote {}", args.output.display());
    println!(
        "  routing mode {}, up to {} skills, classifier {}",
        starter.routing.mode,
        starter.routing.max_skills,
        if starter.classifier.enabled {
            "on"
        } else {
            "off (set [classifier] enabled = true to use a model)"
        }
    );

    Ok(())
}
