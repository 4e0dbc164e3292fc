//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads configuration
//! 2. Reads shard files in parallel
//! 3. Aggregates, merges and ranks
//! 4. Writes output

use super::models::AnalyzeArgs;
use crate::aggregator::{default_worker_count, AggregationDriver, CurrencyNormalizer};
use crate::output::{generate_text_summary, write_report, Report};
use crate::parser::{list_shard_files, read_shards};
use crate::utils::config::{load_config, AnalysisConfig};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Largest accepted worker pool
const MAX_WORKERS: usize = 1024;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written (or would have been, without `--output`)
///
/// # Errors
/// * Config, shard-reading or output failures, with context
/// * Any aggregation error; the whole run fails, no partial report is produced
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Analyzing shards in: {}", args.input_dir.display());
    info!("Profession filter: '{}'", args.profession);

    // Step 1: Configuration
    info!("Step 1/4: Loading configuration...");
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    debug!("Using {} exchange rates", config.rates.len());

    // Step 2: Read shards
    info!("Step 2/4: Reading shard files...");
    let paths = list_shard_files(&args.input_dir).context("Failed to list shard files")?;
    if paths.is_empty() {
        anyhow::bail!("No shard files found in {}", args.input_dir.display());
    }
    let workers = args.workers.unwrap_or_else(default_worker_count);
    let shards = read_shards(&paths, workers).context("Failed to read shard files")?;

    // Step 3: Aggregate
    info!("Step 3/4: Aggregating {} shards...", shards.len());
    let driver = AggregationDriver::new(CurrencyNormalizer::new(config.rates))
        .with_policy(config.ranking)
        .with_workers(workers);
    let outcome = driver
        .run_detailed(&shards, &args.profession)
        .context("Aggregation failed")?;

    let report = Report::from_outcome(args.profession.clone(), outcome);

    // Step 4: Output
    match &args.output_json {
        Some(path) => {
            info!("Step 4/4: Writing report...");
            write_report(&report, path).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        None => info!("Step 4/4: Skipping report file (not requested)"),
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("VACANCY SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Shards:    {}", report.shard_count);
        println!("Vacancies: {}", report.total_vacancies);
        println!("\n{}", generate_text_summary(&report.summary, &report.profession));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.profession.is_empty() {
        anyhow::bail!("Profession name cannot be empty");
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!(
            "Input directory does not exist: {}",
            args.input_dir.display()
        );
    }

    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("workers must be greater than 0");
        }
        if workers > MAX_WORKERS {
            anyhow::bail!("workers is too large (max {})", MAX_WORKERS);
        }
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            anyhow::bail!("Config file does not exist: {}", config.display());
        }
    }

    Ok(())
}
