//! Filtering and ranking of the merged aggregate.
//!
//! Turns a `GlobalAggregate` into the report-ready `RankedSummary`:
//! per-year means and counts, plus two bounded city tables (mean salary and
//! market share). The whole-country entry is never ranked, and cities below
//! the share threshold are dropped before sorting.

use super::merge::GlobalAggregate;
use crate::utils::config::{COUNTRY_ENTRY, MIN_CITY_SHARE, SHARE_PRECISION, TOP_CITIES};
use crate::utils::error::{AggregationError, ConfigError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Rules for building the city tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingPolicy {
    /// Area name excluded from city tables
    pub country_entry: String,

    /// Inclusive lower bound on `city count / total count`
    pub min_share: f64,

    /// Maximum rows per table
    pub top_n: usize,

    /// Decimal places kept for shares
    pub share_precision: u32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            country_entry: COUNTRY_ENTRY.to_string(),
            min_share: MIN_CITY_SHARE,
            top_n: TOP_CITIES,
            share_precision: SHARE_PRECISION,
        }
    }
}

impl RankingPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_share) {
            return Err(ConfigError::InvalidPolicy(format!(
                "min_share must be within [0, 1], got {}",
                self.min_share
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidPolicy(
                "top_n must be greater than 0".to_string(),
            ));
        }
        // 10^16 already exceeds f64 precision
        if self.share_precision > 15 {
            return Err(ConfigError::InvalidPolicy(format!(
                "share_precision must be at most 15, got {}",
                self.share_precision
            )));
        }
        Ok(())
    }
}

/// A row of the mean-salary city table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySalary {
    pub city: String,
    pub mean_salary: i64,
}

/// A row of the market-share city table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityShare {
    pub city: String,
    pub share: f64,
}

/// Final statistics handed to the report writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSummary {
    /// Years covered, ascending
    pub years: Vec<i32>,

    /// Truncated mean salary per year
    pub salary_by_year: BTreeMap<i32, i64>,

    /// Vacancy count per year
    pub amount_by_year: BTreeMap<i32, usize>,

    /// Truncated mean salary per year for the profession (0 if none)
    pub profession_salary_by_year: BTreeMap<i32, i64>,

    /// Profession vacancy count per year (0 if none)
    pub profession_amount_by_year: BTreeMap<i32, usize>,

    /// Cities by mean salary, descending
    pub city_salaries: Vec<CitySalary>,

    /// Cities by market share, descending
    pub city_shares: Vec<CityShare>,
}

/// Rank the merged aggregate with the default policy
///
/// **Public** - main entry point for ranking
///
/// # Errors
/// * `AggregationError::EmptyDataset` - `total_vacancy_count` is 0
pub fn rank(
    global: &GlobalAggregate,
    total_vacancy_count: usize,
) -> Result<RankedSummary, AggregationError> {
    rank_with_policy(global, total_vacancy_count, &RankingPolicy::default())
}

/// Rank the merged aggregate
///
/// Both city tables use a stable sort, so cities with equal values stay in
/// the order they were first seen during the merge.
pub fn rank_with_policy(
    global: &GlobalAggregate,
    total_vacancy_count: usize,
    policy: &RankingPolicy,
) -> Result<RankedSummary, AggregationError> {
    if total_vacancy_count == 0 {
        return Err(AggregationError::EmptyDataset);
    }

    let years: Vec<i32> = global.amount_by_year.keys().copied().collect();

    let salary_by_year = global
        .salary_by_year
        .iter()
        .map(|(&year, series)| (year, truncated_mean(series)))
        .collect();

    let profession_salary_by_year = years
        .iter()
        .map(|year| {
            let mean = global
                .profession_salary_by_year
                .get(year)
                .map_or(0, |series| truncated_mean(series));
            (*year, mean)
        })
        .collect();

    let profession_amount_by_year = years
        .iter()
        .map(|year| {
            let amount = global.profession_amount_by_year.get(year).copied().unwrap_or(0);
            (*year, amount)
        })
        .collect();

    let total = total_vacancy_count as f64;
    let qualifying: Vec<(&str, &[f64])> = global
        .cities
        .iter()
        .filter(|(city, _)| *city != policy.country_entry)
        .filter(|(_, series)| series.len() as f64 / total >= policy.min_share)
        .collect();

    debug!(
        "{} of {} cities pass the {:.2}% share threshold",
        qualifying.len(),
        global.cities.len(),
        policy.min_share * 100.0
    );

    let mut city_salaries: Vec<CitySalary> = qualifying
        .iter()
        .map(|(city, series)| CitySalary {
            city: city.to_string(),
            mean_salary: truncated_mean(series),
        })
        .collect();
    city_salaries.sort_by(|a, b| b.mean_salary.cmp(&a.mean_salary));
    city_salaries.truncate(policy.top_n);

    let mut city_shares: Vec<CityShare> = qualifying
        .iter()
        .map(|(city, series)| CityShare {
            city: city.to_string(),
            share: round_to(series.len() as f64 / total, policy.share_precision),
        })
        .collect();
    city_shares.sort_by(|a, b| b.share.partial_cmp(&a.share).unwrap_or(Ordering::Equal));
    city_shares.truncate(policy.top_n);

    Ok(RankedSummary {
        years,
        salary_by_year,
        amount_by_year: global.amount_by_year.clone(),
        profession_salary_by_year,
        profession_amount_by_year,
        city_salaries,
        city_shares,
    })
}

/// Mean truncated toward zero; 0 for an empty series
pub fn truncated_mean(series: &[f64]) -> i64 {
    if series.is_empty() {
        return 0;
    }
    (series.iter().sum::<f64>() / series.len() as f64) as i64
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
