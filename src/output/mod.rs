//! Output writers for report data.
//!
//! This module handles writing results in various formats:
//! - JSON reports (versioned schema)
//! - Text summaries for the terminal

pub mod json;
pub mod schema;
pub mod summary;

// Re-export main functions
pub use json::{read_report, report_to_string, validate_output_path, write_report};
pub use schema::Report;
pub use summary::generate_text_summary;
