//! Aggregation of vacancy shards into ranked statistics.
//!
//! This module transforms vacancy records into:
//! - Per-shard partial aggregates (salary series by year, profession and city)
//! - A merged whole-dataset aggregate
//! - A ranked summary with bounded city tables

pub mod cities;
pub mod currency;
pub mod driver;
pub mod merge;
pub mod ranking;
pub mod shard;

// Re-export main types and functions
pub use cities::CityAccumulator;
pub use currency::{CurrencyNormalizer, RateTable};
pub use driver::{default_worker_count, AggregationDriver, RunOutcome};
pub use merge::{merge, GlobalAggregate};
pub use ranking::{rank, rank_with_policy, CitySalary, CityShare, RankedSummary, RankingPolicy};
pub use shard::{aggregate_shard, PartialAggregate};
