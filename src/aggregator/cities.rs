//! Insertion-ordered per-city salary accumulator.
//!
//! Cities keep the order in which they were first seen. Ranking relies on
//! this order to break ties deterministically.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityAccumulator {
    order: Vec<String>,
    salaries: HashMap<String, Vec<f64>>,
}

impl CityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one normalized salary for `city`
    pub fn push(&mut self, city: &str, salary: f64) {
        match self.salaries.get_mut(city) {
            Some(series) => series.push(salary),
            None => {
                self.order.push(city.to_string());
                self.salaries.insert(city.to_string(), vec![salary]);
            }
        }
    }

    /// Append a whole salary series for `city`
    pub fn extend(&mut self, city: String, series: Vec<f64>) {
        if let Some(existing) = self.salaries.get_mut(&city) {
            existing.extend(series);
            return;
        }
        self.order.push(city.clone());
        self.salaries.insert(city, series);
    }

    /// Concatenate another accumulator into this one
    ///
    /// Cities new to `self` are appended in `other`'s order.
    pub fn absorb(&mut self, other: CityAccumulator) {
        let CityAccumulator {
            order,
            mut salaries,
        } = other;

        for city in order {
            if let Some(series) = salaries.remove(&city) {
                self.extend(city, series);
            }
        }
    }

    /// Number of vacancies recorded for `city`
    pub fn count(&self, city: &str) -> usize {
        self.salaries.get(city).map_or(0, Vec::len)
    }

    pub fn salaries(&self, city: &str) -> Option<&[f64]> {
        self.salaries.get(city).map(Vec::as_slice)
    }

    /// Cities with their salary series, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.order.iter().filter_map(move |city| {
            self.salaries
                .get(city)
                .map(|series| (city.as_str(), series.as_slice()))
        })
    }

    /// Number of distinct cities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vacancies across all cities
    pub fn total_count(&self) -> usize {
        self.salaries.values().map(Vec::len).sum()
    }
}
