//! CLI argument parsing definitions

use clap::{Args, Parser, Subcommand};
use opload_config::parse_duration;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "opload", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error) or a filter directive
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a load scenario against the operations service
    Run(RunArgs),

    /// Build the seed data of a scenario and write the dump without generating load
    Seed {
        /// Scenario name (see `opload scenarios`)
        scenario: String,

        /// Number of operations to create instead of the scenario's default
        #[arg(long, value_name = "N")]
        count: Option<usize>,

        /// Base URL of the operations service
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// List registered scenarios
    Scenarios,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Scenario name (see `opload scenarios`)
    pub scenario: String,

    /// Number of concurrent virtual users
    #[arg(short, long, value_name = "N")]
    pub users: Option<usize>,

    /// Users started per second
    #[arg(short = 'r', long, value_name = "RATE")]
    pub spawn_rate: Option<f64>,

    /// Stop after this long, e.g. 30s, 5m, 1h
    #[arg(short = 't', long, value_name = "DURATION", value_parser = parse_duration)]
    pub run_time: Option<Duration>,

    /// Stop each user after this many tasks
    #[arg(long, value_name = "N")]
    pub iterations: Option<u64>,

    /// Base URL of the operations service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Number of seed operations to create instead of the scenario's default
    #[arg(long, value_name = "N")]
    pub seed_count: Option<usize>,

    /// Seed for task selection and think-time, for reproducible schedules
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,

    /// Write the final statistics snapshot as JSON
    #[arg(long, value_name = "PATH")]
    pub stats_json: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path; prints to stdout when omitted
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "opload",
            "--log-level",
            "debug",
            "run",
            "get_operation_with_seeds",
            "-u",
            "10",
            "-r",
            "2.5",
            "-t",
            "1m 30s",
            "--stats-json",
            "stats.json",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.scenario, "get_operation_with_seeds");
        assert_eq!(args.users, Some(10));
        assert_eq!(args.spawn_rate, Some(2.5));
        assert_eq!(args.run_time, Some(Duration::from_secs(90)));
        assert_eq!(args.stats_json, Some(PathBuf::from("stats.json")));
        assert!(args.iterations.is_none());
    }

    #[test]
    fn test_invalid_run_time_is_rejected() {
        let result = Cli::try_parse_from(["opload", "run", "x", "--run-time", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_count() {
        let cli =
            Cli::try_parse_from(["opload", "seed", "get_operation_with_seeds", "--count", "50"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Seed { count: Some(50), .. })
        ));
    }
}
