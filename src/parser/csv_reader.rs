//! CSV shard reader.
//!
//! Reads one vacancy shard per file. Columns are located by header name,
//! so files with extra, missing or reordered columns are accepted.

use super::schema::{Experience, Salary, Shard, VacancyRecord};
use crate::utils::config::DEFAULT_CURRENCY;
use crate::utils::error::ParseError;
use chrono::{DateTime, Datelike};
use csv::StringRecord;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Timestamp layout of the `published_at` column, e.g. `2007-12-03T17:40:09+0300`
const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Header name -> column index
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { index }
    }

    /// Field value, or "" when the column is absent
    fn get<'r>(&self, row: &'r StringRecord, field: &str) -> &'r str {
        self.index
            .get(field)
            .and_then(|&i| row.get(i))
            .unwrap_or("")
    }

    fn has(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }
}

/// List shard files in a directory
///
/// **Public** - main entry point for shard discovery
///
/// Only regular files are returned, sorted by file name so that shard order
/// (and with it city tie-break order) is stable across runs.
pub fn list_shard_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ParseError> {
    let dir = dir.as_ref();
    let io_err = |source| ParseError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} shard files in {}", files.len(), dir.display());
    Ok(files)
}

/// Read every shard file in parallel on a pool of `workers` threads
///
/// Shards come back in the same order as `paths`. The first unreadable file
/// aborts the whole read. A `workers` of 0 is treated as 1.
pub fn read_shards(paths: &[PathBuf], workers: usize) -> Result<Vec<Shard>, ParseError> {
    let workers = workers.max(1);
    info!("Reading {} shard files on {} workers", paths.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("shard-reader-{}", i))
        .build()?;

    pool.install(|| paths.par_iter().map(|path| read_shard(path)).collect())
}

/// Read a single shard file
///
/// # Errors
/// * `ParseError::Io` - File cannot be opened
/// * `ParseError::Csv` - Malformed CSV
/// * `ParseError::MissingHeader` - File is empty
/// * `ParseError::InvalidField` - Salary or date cannot be parsed
pub fn read_shard(path: impl AsRef<Path>) -> Result<Shard, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::MissingHeader(path.to_path_buf()));
    }
    let columns = Columns::from_headers(&headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(&columns, &row, line)?);
    }

    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!("Read {} records from {}", records.len(), label);

    Ok(Shard::new(label, records))
}

/// Build a record from one CSV row
///
/// **Private** - internal helper for read_shard
fn parse_row(columns: &Columns, row: &StringRecord, line: u64) -> Result<VacancyRecord, ParseError> {
    let currency = if columns.has("salary_currency") {
        columns.get(row, "salary_currency").to_string()
    } else {
        DEFAULT_CURRENCY.to_string()
    };

    let salary = Salary {
        from: parse_bound(columns.get(row, "salary_from"), "salary_from", line)?,
        to: parse_bound(columns.get(row, "salary_to"), "salary_to", line)?,
        gross: parse_gross(columns.get(row, "salary_gross"), line)?,
        currency,
    };

    Ok(VacancyRecord {
        name: columns.get(row, "name").to_string(),
        city: columns.get(row, "area_name").to_string(),
        experience: Experience::from_id(columns.get(row, "experience_id")),
        salary,
        year: parse_year(columns.get(row, "published_at"), line)?,
    })
}

/// Parse a salary bound, truncating toward zero ("100.7" -> 100)
pub fn parse_bound(value: &str, field: &'static str, line: u64) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(f64::trunc)
        .ok_or_else(|| ParseError::InvalidField {
            line,
            field,
            value: value.to_string(),
        })
}

fn parse_gross(value: &str, line: u64) -> Result<Option<bool>, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(ParseError::InvalidField {
            line,
            field: "salary_gross",
            value: value.to_string(),
        }),
    }
}

/// Extract the publication year from a `published_at` value
///
/// Full timestamps are parsed with chrono; anything else falls back to the
/// leading `YYYY` of the date part.
pub fn parse_year(value: &str, line: u64) -> Result<i32, ParseError> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_str(value, PUBLISHED_AT_FORMAT) {
        return Ok(timestamp.year());
    }

    value
        .split('T')
        .next()
        .and_then(|date| date.split('-').next())
        .filter(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|year| year.parse::<i32>().ok())
        .ok_or_else(|| ParseError::InvalidField {
            line,
            field: "published_at",
            value: value.to_string(),
        })
}
