//! Output JSON schema definitions for report data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::driver::RunOutcome;
use crate::aggregator::ranking::RankedSummary;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Profession substring the filtered series were computed for
    pub profession: String,

    /// Vacancies across all shards
    pub total_vacancies: usize,

    /// Number of shards aggregated
    pub shard_count: usize,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Ranked statistics
    pub summary: RankedSummary,
}

impl Report {
    /// Wrap a run outcome with metadata, stamped with the current time
    pub fn from_outcome(profession: impl Into<String>, outcome: RunOutcome) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            profession: profession.into(),
            total_vacancies: outcome.total_vacancies,
            shard_count: outcome.shard_count,
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary: outcome.summary,
        }
    }
}
