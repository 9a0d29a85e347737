use clap::Parser;
use skillroute::cli::{
    handle_completions, handle_config_init, handle_route, handle_skills, load_config, Cli,
    Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.command.config_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Err(e) = skillroute::logging::init_tracing(&logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Route(args) => handle_route(&args, &config).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Skills(args) => handle_skills(&args, &config).map(|output| {
            println!("{}", output);
        }),
        Commands::Config(ConfigCommands::Init(args)) => handle_config_init(&args),
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
