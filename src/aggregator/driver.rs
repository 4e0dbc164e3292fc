//! Parallel map -> merge -> rank driver.
//!
//! Shards are aggregated on a bounded rayon pool, one shard per task. The
//! driver waits for every task, then merges and ranks on the calling thread.

use super::currency::CurrencyNormalizer;
use super::merge::merge;
use super::ranking::{rank_with_policy, RankedSummary, RankingPolicy};
use super::shard::{aggregate_shard, PartialAggregate};
use crate::parser::schema::Shard;
use crate::utils::config::RESERVED_CORES;
use crate::utils::error::AggregationError;
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

/// Result of a full run, with the totals the report needs
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RankedSummary,
    pub total_vacancies: usize,
    pub shard_count: usize,
}

/// Worker pool size: available cores minus a reserve, at least 1
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
        .saturating_sub(RESERVED_CORES)
        .max(1)
}

/// Orchestrates one aggregation run
#[derive(Debug, Clone)]
pub struct AggregationDriver {
    normalizer: CurrencyNormalizer,
    policy: RankingPolicy,
    workers: usize,
}

impl AggregationDriver {
    pub fn new(normalizer: CurrencyNormalizer) -> Self {
        Self {
            normalizer,
            policy: RankingPolicy::default(),
            workers: default_worker_count(),
        }
    }

    /// Set the pool size (0 is treated as 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Aggregate, merge and rank all shards
    ///
    /// **Public** - main entry point for the aggregation engine
    ///
    /// # Errors
    /// * `AggregationError::WorkerFailure` - a shard failed; wraps its error
    /// * `AggregationError::EmptyDataset` - no shard has any record
    /// * `AggregationError::PoolSetup` - the worker pool could not be created
    pub fn run(&self, shards: &[Shard], profession: &str) -> Result<RankedSummary, AggregationError> {
        self.run_detailed(shards, profession).map(|outcome| outcome.summary)
    }

    /// Same as `run`, also returning vacancy and shard totals
    pub fn run_detailed(
        &self,
        shards: &[Shard],
        profession: &str,
    ) -> Result<RunOutcome, AggregationError> {
        let start_time = Instant::now();
        info!(
            "Aggregating {} shards on {} workers (profession: '{}')",
            shards.len(),
            self.workers,
            profession
        );

        let partials = self.aggregate_all(shards, profession)?;
        debug!("All {} shards aggregated in {:.2?}", partials.len(), start_time.elapsed());

        let total_vacancies: usize = shards.iter().map(Shard::len).sum();
        let global = merge(partials);
        let summary = rank_with_policy(&global, total_vacancies, &self.policy)?;

        info!(
            "Ranked {} vacancies over {} years in {:.2?}",
            total_vacancies,
            summary.years.len(),
            start_time.elapsed()
        );

        Ok(RunOutcome {
            summary,
            total_vacancies,
            shard_count: shards.len(),
        })
    }

    /// Map step: one task per shard, results in shard order
    ///
    /// **Private** - collection stops at the first failing shard
    fn aggregate_all(
        &self,
        shards: &[Shard],
        profession: &str,
    ) -> Result<Vec<PartialAggregate>, AggregationError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("shard-worker-{}", i))
            .build()?;

        let normalizer = &self.normalizer;
        pool.install(|| {
            shards
                .par_iter()
                .map(|shard| {
                    aggregate_shard(shard, normalizer, profession).map_err(|err| {
                        AggregationError::WorkerFailure {
                            shard: shard.label.clone(),
                            source: Box::new(err),
                        }
                    })
                })
                .collect()
        })
    }
}

impl Default for AggregationDriver {
    fn default() -> Self {
        Self::new(CurrencyNormalizer::default())
    }
}
