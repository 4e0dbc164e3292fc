//! Merge of per-shard partial aggregates.
//!
//! Merging is pointwise-additive: salary series are concatenated and counts
//! summed, per year and per city. Any order or grouping of partials yields
//! the same sums and counts; only the order of values inside a series differs.

use super::cities::CityAccumulator;
use super::shard::PartialAggregate;
use log::debug;
use std::collections::BTreeMap;

/// Whole-dataset statistics after all shards are merged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalAggregate {
    pub salary_by_year: BTreeMap<i32, Vec<f64>>,
    pub amount_by_year: BTreeMap<i32, usize>,

    /// Every year of `amount_by_year` has an entry here, possibly empty
    pub profession_salary_by_year: BTreeMap<i32, Vec<f64>>,
    pub profession_amount_by_year: BTreeMap<i32, usize>,

    /// Per-city salaries across all years
    pub cities: CityAccumulator,
}

impl GlobalAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one partial into the aggregate
    pub fn absorb(&mut self, partial: PartialAggregate) {
        let PartialAggregate {
            year,
            salaries,
            profession_salaries,
            cities,
        } = partial;

        if let Some(year) = year {
            *self.amount_by_year.entry(year).or_insert(0) += salaries.len();
            *self.profession_amount_by_year.entry(year).or_insert(0) += profession_salaries.len();
            self.salary_by_year.entry(year).or_default().extend(salaries);
            self.profession_salary_by_year
                .entry(year)
                .or_default()
                .extend(profession_salaries);
        }

        self.cities.absorb(cities);
    }

    /// Fold another global aggregate into this one
    pub fn combine(&mut self, other: GlobalAggregate) {
        for (year, salaries) in other.salary_by_year {
            self.salary_by_year.entry(year).or_default().extend(salaries);
        }
        for (year, amount) in other.amount_by_year {
            *self.amount_by_year.entry(year).or_insert(0) += amount;
        }
        for (year, salaries) in other.profession_salary_by_year {
            self.profession_salary_by_year
                .entry(year)
                .or_default()
                .extend(salaries);
        }
        for (year, amount) in other.profession_amount_by_year {
            *self.profession_amount_by_year.entry(year).or_insert(0) += amount;
        }
        self.cities.absorb(other.cities);
    }

    /// Total vacancies across all years
    pub fn total_count(&self) -> usize {
        self.amount_by_year.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.amount_by_year.is_empty() && self.cities.is_empty()
    }
}

/// Merge partial aggregates into one global aggregate
///
/// **Public** - runs once, after every shard has been aggregated
///
/// Partials are folded in iteration order, which fixes the first-seen order
/// of cities. An empty input gives an empty aggregate.
pub fn merge(partials: impl IntoIterator<Item = PartialAggregate>) -> GlobalAggregate {
    let mut global = GlobalAggregate::new();
    let mut merged = 0usize;

    for partial in partials {
        global.absorb(partial);
        merged += 1;
    }

    debug!(
        "Merged {} partials: {} years, {} cities, {} vacancies",
        merged,
        global.amount_by_year.len(),
        global.cities.len(),
        global.total_count()
    );

    global
}
