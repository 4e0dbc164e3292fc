//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while aggregating vacancy shards
#[derive(Error, Debug)]
pub enum AggregationError {
    /// `record` is the 0-based position of the record within its shard,
    /// not a file line number
    #[error("Unknown currency code '{code}' at record index {record} (0-based, header excluded)")]
    UnknownCurrency { code: String, record: usize },

    #[error("Cannot rank an empty dataset (total vacancy count is 0)")]
    EmptyDataset,

    #[error("Shard '{shard}' failed")]
    WorkerFailure {
        shard: String,
        #[source]
        source: Box<AggregationError>,
    },

    #[error("Failed to build worker pool: {0}")]
    PoolSetup(#[from] rayon::ThreadPoolBuildError),
}

impl AggregationError {
    /// Innermost error, with any worker wrapping peeled off
    pub fn root_cause(&self) -> &AggregationError {
        match self {
            AggregationError::WorkerFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Errors that can occur while reading shard files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Shard file has no header row: {0}")]
    MissingHeader(PathBuf),

    #[error("Invalid value for '{field}' on line {line}: '{value}'")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Failed to build reader pool: {0}")]
    PoolSetup(#[from] rayon::ThreadPoolBuildError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read report {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid exchange rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },

    #[error("Invalid ranking policy: {0}")]
    InvalidPolicy(String),
}
