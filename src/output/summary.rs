//! Plain-text rendering of a ranked summary.

use crate::aggregator::ranking::RankedSummary;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Render the summary as labelled lines for the terminal
///
/// One line per year series, followed by the two city tables.
pub fn generate_text_summary(summary: &RankedSummary, profession: &str) -> String {
    let mut lines = Vec::new();

    let series = [
        ("Salary by year:".to_string(), format_series(&summary.salary_by_year)),
        ("Vacancies by year:".to_string(), format_series(&summary.amount_by_year)),
        (
            format!("Salary by year ({}):", profession),
            format_series(&summary.profession_salary_by_year),
        ),
        (
            format!("Vacancies by year ({}):", profession),
            format_series(&summary.profession_amount_by_year),
        ),
    ];
    for (label, values) in series {
        lines.push(format!("{:<40} {}", label, values));
    }

    lines.push(String::new());
    lines.push("  TOP CITIES BY SALARY".to_string());
    lines.push(format!("  {:<3} {:<30} {:>12}", "#", "City", "Salary"));
    for (i, row) in summary.city_salaries.iter().enumerate() {
        lines.push(format!("  {:<3} {:<30} {:>12}", i + 1, row.city, row.mean_salary));
    }

    lines.push(String::new());
    lines.push("  TOP CITIES BY SHARE".to_string());
    lines.push(format!("  {:<3} {:<30} {:>12}", "#", "City", "Share"));
    for (i, row) in summary.city_shares.iter().enumerate() {
        lines.push(format!(
            "  {:<3} {:<30} {:>11.2}%",
            i + 1,
            row.city,
            row.share * 100.0
        ));
    }

    lines.join("\n")
}

fn format_series<V: Display>(series: &BTreeMap<i32, V>) -> String {
    let entries: Vec<String> = series
        .iter()
        .map(|(year, value)| format!("{}: {}", year, value))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
