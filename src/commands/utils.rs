use crate::output::read_report;
use crate::utils::config::{load_config, AnalysisConfig, REFERENCE_CURRENCY, SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema version: {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Profession: {}", report.profession);
    println!("  Vacancies: {}", report.total_vacancies);
    println!("  Shards: {}", report.shard_count);
    println!("  Years: {}", report.summary.years.len());
    println!("  Ranked cities: {}", report.summary.city_salaries.len());

    Ok(())
}

/// Display the exchange-rate table in effect
pub fn display_currencies(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    println!("Exchange rates to {}:", REFERENCE_CURRENCY);
    for (code, rate) in config.rates.iter() {
        println!("  {:<5} {:>10}", code, rate);
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Vacancy Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Salary and market-share statistics over per-year vacancy shards.");
}
