//! Configuration and constants for the analysis pipeline.

use crate::aggregator::currency::RateTable;
use crate::aggregator::ranking::RankingPolicy;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Every salary is converted into this currency
pub const REFERENCE_CURRENCY: &str = "RUR";

/// Currency assumed when a shard file has no currency column
pub const DEFAULT_CURRENCY: &str = "RUR";

/// Synthetic whole-country area name, never ranked as a city
pub const COUNTRY_ENTRY: &str = "Россия";

/// Minimum market share for a city to appear in the city tables
pub const MIN_CITY_SHARE: f64 = 0.01;

/// Number of cities kept in each ranked table
pub const TOP_CITIES: usize = 10;

/// Decimal places kept for market shares
pub const SHARE_PRECISION: u32 = 4;

/// Cores left free when sizing the worker pool
pub const RESERVED_CORES: usize = 2;

// Built-in conversion rates to RUR
pub const DEFAULT_RATES: &[(&str, f64)] = &[
    ("AZN", 35.68),
    ("BYR", 23.91),
    ("EUR", 59.90),
    ("GEL", 21.74),
    ("KGS", 0.76),
    ("KZT", 0.13),
    ("RUR", 1.0),
    ("UAH", 1.64),
    ("USD", 60.66),
    ("UZS", 0.0055),
];

/// Complete analysis configuration
///
/// Every section is optional in the TOML file; a missing `[rates]` table keeps
/// the built-in rates and a missing `[ranking]` table keeps the default policy.
///
/// ```toml
/// [rates]
/// RUR = 1.0
/// USD = 92.5
///
/// [ranking]
/// top_n = 15
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Conversion rates to the reference currency
    #[serde(default)]
    pub rates: RateTable,

    /// City table filtering and ranking rules
    #[serde(default)]
    pub ranking: RankingPolicy,
}

impl AnalysisConfig {
    /// Check rates and ranking policy
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rates.validate()?;
        self.ranking.validate()?;
        Ok(())
    }
}

/// Load analysis configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::InvalidRate` / `ConfigError::InvalidPolicy` - If values are out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    config.validate()?;

    debug!(
        "Config loaded: {} currencies, top {} cities",
        config.rates.len(),
        config.ranking.top_n
    );

    Ok(config)
}
