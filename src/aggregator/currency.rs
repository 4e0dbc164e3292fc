//! Currency normalization.
//!
//! Collapses a salary range into a single value in the reference currency:
//! `(from + to) / 2 * rate[currency]`.

use crate::utils::config::DEFAULT_RATES;
use crate::utils::error::{AggregationError, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static conversion rates to the reference currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        DEFAULT_RATES
            .iter()
            .map(|&(code, rate)| (code.to_string(), rate))
            .collect()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

impl RateTable {
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currency codes and rates, sorted by code
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// Every rate must be finite and strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            Some((code, rate)) => Err(ConfigError::InvalidRate {
                code: code.clone(),
                rate: *rate,
            }),
            None => Ok(()),
        }
    }
}

/// Converts salary ranges into the reference currency
///
/// Shared read-only by all workers during a run.
#[derive(Debug, Clone, Default)]
pub struct CurrencyNormalizer {
    rates: RateTable,
}

impl CurrencyNormalizer {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// Midpoint of the range, converted with the currency's rate
    ///
    /// # Errors
    /// * `AggregationError::UnknownCurrency` - `currency` is not in the rate table.
    ///   The `record` field is left at 0; the shard aggregator fills in the
    ///   position of the offending record.
    pub fn normalize(&self, low: f64, high: f64, currency: &str) -> Result<f64, AggregationError> {
        let rate = self
            .rates
            .get(currency)
            .ok_or_else(|| AggregationError::UnknownCurrency {
                code: currency.to_string(),
                record: 0,
            })?;

        Ok((low + high) / 2.0 * rate)
    }
}
