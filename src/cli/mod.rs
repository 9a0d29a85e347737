//! CLI module for skillroute
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `route` - Route a prompt against an installed-skill catalog
//! - `skills` - Show the installed skills and their routing vocabulary
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Route a prompt, printing a table
//! skillroute route "who won the super bowl?" --catalog catalog.toml
//!
//! # Same, as JSON with a memory file and no model call
//! skillroute route "anything on tonight?" -k catalog.toml -m memory.md --no-classifier --json
//!
//! # Generate shell completions
//! skillroute completions bash > ~/.bash_completion.d/skillroute
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod route;
pub mod skills;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use route::handle_route;
pub use skills::handle_skills;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::agents::DEFAULT_MAX_AGENTS;
use crate::config::SkillrouteConfig;

/// skillroute - skill and agent routing engine
#[derive(Parser, Debug)]
#[command(
    name = "skillroute",
    version,
    about = "Route natural-language requests to installed skills and agents"
)]
pub struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "SKILLROUTE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route a prompt to skills and agents
    Route(RouteArgs),
    /// List installed skills with aliases and tool vocabulary
    Skills(SkillsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Configuration file named by the command, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Route(args) => args.config.as_deref(),
            Commands::Skills(args) => args.config.as_deref(),
            Commands::Config(_) | Commands::Completions(_) => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Prompt to route
    pub prompt: String,

    /// Catalog of installed skills, tools and agents (.toml or .json)
    #[arg(short = 'k', long)]
    pub catalog: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Long-term memory file (may contain a "Fan Profile" section)
    #[arg(short, long)]
    pub memory: Option<PathBuf>,

    /// Summary of recent conversation turns
    #[arg(long)]
    pub context: Option<String>,

    /// Maximum number of agents to return
    #[arg(long, default_value_t = DEFAULT_MAX_AGENTS)]
    pub max_agents: usize,

    /// Skip the model classifier even when configured
    #[arg(long)]
    pub no_classifier: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SkillsArgs {
    /// Catalog of installed skills, tools and agents (.toml or .json)
    #[arg(short = 'k', long)]
    pub catalog: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "skillroute.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load, env-override and validate the configuration for a command.
pub fn load_config(path: Option<&Path>) -> Result<SkillrouteConfig, Box<dyn std::error::Error>> {
    let config = SkillrouteConfig::load(path)?.with_env_overrides();
    config.validate()?;
    Ok(config)
}
