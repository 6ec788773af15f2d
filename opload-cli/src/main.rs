use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = commands::load_config(cli.config.as_deref())?;
    logging::init_tracing(&config.logging, cli.log_level.as_deref());
    source.log();

    match cli.command {
        Some(Commands::Run(args)) => {
            info!("opload {} starting", env!("CARGO_PKG_VERSION"));
            commands::run::handle_run(config, args).await
        }
        Some(Commands::Seed {
            scenario,
            count,
            base_url,
        }) => commands::seed::handle_seed(config, &scenario, count, base_url).await,
        Some(Commands::Scenarios) => {
            commands::scenarios::handle_scenarios();
            Ok(())
        }
        Some(Commands::Config { config_cmd }) => match config_cmd {
            ConfigCommands::Validate { config_file } => {
                commands::config::handle_config_validate(&config_file)
            }
            ConfigCommands::Generate { output, force } => {
                commands::config::handle_config_generate(output.as_deref(), force)
            }
        },
        None => {
            // If no subcommand is provided, print help
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help().context("Failed to print help")?;
            println!();
            Ok(())
        }
    }
}
