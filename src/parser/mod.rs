//! Shard ingestion and input record definitions.
//!
//! This module handles:
//! - Enumerating shard files in a directory
//! - Parsing CSV rows into vacancy records
//! - Defining the record and shard types the aggregator consumes

pub mod csv_reader;
pub mod schema;

// Re-export main types
pub use csv_reader::{list_shard_files, read_shard, read_shards};
pub use schema::{Experience, Salary, Shard, VacancyRecord};
