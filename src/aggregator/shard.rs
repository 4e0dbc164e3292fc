//! Per-shard statistical reduction.
//!
//! One pass over a shard's records produces a `PartialAggregate`: the
//! normalized salary series for the shard's year, the profession-filtered
//! series, and per-city salary series.

use super::cities::CityAccumulator;
use super::currency::CurrencyNormalizer;
use crate::parser::schema::Shard;
use crate::utils::error::AggregationError;
use log::{debug, warn};

/// Statistics of a single shard, prior to merging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAggregate {
    /// Year the shard is attributed to (`None` for an empty, unhinted shard)
    pub year: Option<i32>,

    /// Normalized salary of every vacancy, in record order
    pub salaries: Vec<f64>,

    /// Subsequence of `salaries` for vacancies matching the profession
    pub profession_salaries: Vec<f64>,

    /// Normalized salaries grouped by city
    pub cities: CityAccumulator,
}

impl PartialAggregate {
    /// Number of vacancies in the shard
    pub fn count(&self) -> usize {
        self.salaries.len()
    }

    /// Number of vacancies matching the profession
    pub fn profession_count(&self) -> usize {
        self.profession_salaries.len()
    }
}

/// Reduce one shard to a partial aggregate
///
/// **Public** - unit of work for the driver's worker pool
///
/// # Arguments
/// * `shard` - Records of one calendar year
/// * `normalizer` - Currency conversion shared by all workers
/// * `profession` - Case-sensitive substring matched against vacancy names
///
/// # Preconditions
/// The shard must hold a single year. Without a year hint the year of the
/// last record is used for the whole shard; records from other years are
/// counted under that year and a warning is logged.
///
/// # Errors
/// * `AggregationError::UnknownCurrency` - with the index of the first bad record
pub fn aggregate_shard(
    shard: &Shard,
    normalizer: &CurrencyNormalizer,
    profession: &str,
) -> Result<PartialAggregate, AggregationError> {
    let year = shard.year();
    let mut partial = PartialAggregate {
        year,
        salaries: Vec::with_capacity(shard.len()),
        ..Default::default()
    };
    let mut foreign_years = 0usize;

    for (index, record) in shard.records.iter().enumerate() {
        let salary = &record.salary;
        let value = normalizer
            .normalize(salary.from, salary.to, &salary.currency)
            .map_err(|err| match err {
                AggregationError::UnknownCurrency { code, .. } => {
                    AggregationError::UnknownCurrency { code, record: index }
                }
                other => other,
            })?;

        partial.salaries.push(value);
        if record.name.contains(profession) {
            partial.profession_salaries.push(value);
        }
        partial.cities.push(&record.city, value);

        if Some(record.year) != year {
            foreign_years += 1;
        }
    }

    if foreign_years > 0 {
        warn!(
            "Shard '{}': {} records are not from {:?}; counted under that year anyway",
            shard.label, foreign_years, year
        );
    }

    debug!(
        "Shard '{}' ({:?}): {} vacancies, {} matching profession, {} cities",
        shard.label,
        year,
        partial.count(),
        partial.profession_count(),
        partial.cities.len()
    );

    Ok(partial)
}
