//! Vacancy Stats
//!
//! Salary and market-share statistics over job vacancy data split into
//! per-year shards.
//!
//! Shards are aggregated in parallel into partial aggregates, merged, and
//! ranked into a bounded summary: mean salary and vacancy count per year
//! (overall and for one profession), and the top cities by mean salary and
//! by share of vacancies.
//!
//! ## Getting Started
//!
//! ```bash
//! vacancy-stats analyze --input csv/ --profession Аналитик --summary
//! ```
//!
//! Library use:
//!
//! ```ignore
//! use vacancy_stats::aggregator::AggregationDriver;
//! use vacancy_stats::parser::{list_shard_files, read_shards};
//!
//! let shards = read_shards(&list_shard_files("csv")?, 4)?;
//! let summary = AggregationDriver::default().run(&shards, "Аналитик")?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
