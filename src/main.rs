//! Vacancy Stats CLI
//!
//! Aggregates per-year vacancy shards into salary and market-share
//! statistics by year and by city.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use vacancy_stats::commands::{
    display_currencies, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};

/// Vacancy Stats - salary statistics over vacancy shards
#[derive(Parser, Debug)]
#[command(name = "vacancy-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a directory of shard files
    Analyze {
        /// Directory with one CSV file per year
        #[arg(short, long)]
        input: PathBuf,

        /// Profession name (case-sensitive substring of vacancy names)
        #[arg(short, long)]
        profession: String,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Skip writing the JSON report
        #[arg(long)]
        no_output: bool,

        /// TOML config with exchange rates and ranking policy
        #[arg(short, long, env = "VACANCY_STATS_CONFIG")]
        config: Option<PathBuf>,

        /// Worker threads (default: available cores minus 2)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the exchange-rate table
    Currencies {
        /// TOML config overriding the built-in rates
        #[arg(short, long, env = "VACANCY_STATS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            profession,
            output,
            no_output,
            config,
            workers,
            summary,
        } => {
            let args = AnalyzeArgs {
                input_dir: input,
                profession,
                output_json: (!no_output).then_some(output),
                config,
                workers,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Currencies { config } => {
            display_currencies(config.as_deref())?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
