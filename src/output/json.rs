//! JSON report reader and writer.

use super::schema::Report;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a report as pretty-printed JSON, creating parent directories
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::InvalidPath` - Empty path, a directory, or parents cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_output_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Report for '{}' written to {} ({} years, {} ranked cities)",
        report.profession,
        output_path.display(),
        report.summary.years.len(),
        report.summary.city_salaries.len()
    );
    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &Report) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Reject empty paths and existing directories
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => parent,
        _ => return Ok(()),
    };

    debug!("Creating report directory {}", parent.display());
    fs::create_dir_all(parent).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create {}: {}", parent.display(), e))
    })
}

/// Load a report back from disk
///
/// # Errors
/// * `OutputError::ReadFailed` - File cannot be opened
/// * `OutputError::SerializationFailed` - Not a valid report document
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();
    let file = File::open(input_path).map_err(|source| OutputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;

    let report: Report = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        "Loaded report v{} for '{}' from {}",
        report.version,
        report.profession,
        input_path.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ranking::{CitySalary, CityShare, RankedSummary};
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    fn sample_report() -> Report {
        Report {
            version: "1.0.0".to_string(),
            profession: "Аналитик".to_string(),
            total_vacancies: 2,
            shard_count: 2,
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            summary: RankedSummary {
                years: vec![2020, 2021],
                salary_by_year: BTreeMap::from([(2020, 150), (2021, 400)]),
                amount_by_year: BTreeMap::from([(2020, 1), (2021, 1)]),
                profession_salary_by_year: BTreeMap::from([(2020, 150), (2021, 0)]),
                profession_amount_by_year: BTreeMap::from([(2020, 1), (2021, 0)]),
                city_salaries: vec![CitySalary {
                    city: "Москва".to_string(),
                    mean_salary: 275,
                }],
                city_shares: vec![CityShare {
                    city: "Москва".to_string(),
                    share: 1.0,
                }],
            },
        }
    }

    #[test]
    fn test_write_then_read_report() {
        let report = sample_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();

        assert_eq!(read_report(temp_file.path()).unwrap(), report);
    }

    #[test]
    fn test_report_to_string_has_year_keys() {
        let json = report_to_string(&sample_report()).unwrap();
        assert!(json.contains("\"2020\": 150"));
        assert!(json.contains("Москва"));
    }

    #[test]
    fn test_validate_output_path_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(Path::new("")).is_err());
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&sample_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_report_is_read_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("absent.json");

        let err = read_report(&missing).unwrap_err();

        assert!(matches!(err, OutputError::ReadFailed { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("absent.json"));
    }
}
