//! Input record definitions for vacancy shards.
//!
//! These are produced by the CSV reader (or built directly in tests) and
//! consumed once by the aggregator.

use serde::{Deserialize, Serialize};

/// Required work experience tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Experience {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
    #[default]
    Unspecified,
}

impl Experience {
    /// Map an `experience_id` column value to a tier
    ///
    /// Unknown or empty identifiers map to `Unspecified`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "noExperience" => Experience::NoExperience,
            "between1And3" => Experience::Between1And3,
            "between3And6" => Experience::Between3And6,
            "moreThan6" => Experience::MoreThan6,
            _ => Experience::Unspecified,
        }
    }
}

/// Salary range as published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    /// Lower bound of the range
    pub from: f64,

    /// Upper bound of the range
    pub to: f64,

    /// Whether the range is before tax (`None` if not stated)
    pub gross: Option<bool>,

    /// Currency code, e.g. "RUR" or "USD"
    pub currency: String,
}

impl Salary {
    pub fn new(from: f64, to: f64, currency: impl Into<String>) -> Self {
        Self {
            from,
            to,
            gross: None,
            currency: currency.into(),
        }
    }
}

/// A single job vacancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    /// Vacancy title, matched against the profession filter
    pub name: String,

    /// Area name (city, or the whole-country entry)
    pub city: String,

    /// Required experience
    pub experience: Experience,

    /// Published salary range
    pub salary: Salary,

    /// Publication year
    pub year: i32,
}

impl VacancyRecord {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        salary: Salary,
        year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            experience: Experience::Unspecified,
            salary,
            year,
        }
    }
}

/// One partition of the input dataset
///
/// A shard is expected to hold vacancies from exactly one calendar year.
/// This is not checked when the shard is built.
#[derive(Debug, Clone, Default)]
pub struct Shard {
    /// Identifies the shard in logs and errors (file name when read from disk)
    pub label: String,

    /// Year supplied by the caller, overriding the last-record rule
    pub year_hint: Option<i32>,

    /// Vacancies in file order
    pub records: Vec<VacancyRecord>,
}

impl Shard {
    pub fn new(label: impl Into<String>, records: Vec<VacancyRecord>) -> Self {
        Self {
            label: label.into(),
            year_hint: None,
            records,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_hint = Some(year);
        self
    }

    /// Year the shard's statistics are attributed to
    ///
    /// The hint if one was given, otherwise the year of the last record.
    /// `None` for an empty shard without a hint.
    pub fn year(&self) -> Option<i32> {
        self.year_hint
            .or_else(|| self.records.last().map(|record| record.year))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
