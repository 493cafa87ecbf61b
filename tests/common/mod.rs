//! Common test utilities module
//!
//! Provides shared helpers for integration tests:
//! - Monthly tables built from in-memory columns
//! - Deterministic noise series
//! - Temporary files with automatic cleanup

#![allow(dead_code)]

use std::io::Write;

use chrono::NaiveDate;
use lagreg::{TimeIndex, TimeSeriesTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

/// Build a monthly table starting 2020-01 from `(name, values)` columns
pub fn monthly_table(columns: &[(&str, Vec<f64>)]) -> TimeSeriesTable {
    let rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let index = TimeIndex::monthly(start, rows).unwrap();

    let mut table = TimeSeriesTable::new(index);
    for (name, values) in columns {
        table.add_column(*name, values.clone()).unwrap();
    }
    table
}

/// `1.0, 2.0, ..., n`
pub fn ramp(n: usize) -> Vec<f64> {
    (1..=n).map(|v| v as f64).collect()
}

/// Uniform noise in [-1, 1) from a fixed seed
pub fn noise(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

/// Write `contents` to a temporary file with the given suffix
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("lagreg_test_")
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file.flush().expect("Failed to flush temporary file");
    file
}

/// Helper to create a test CSV file with given data
pub fn create_test_csv(headers: &[&str], rows: &[Vec<String>]) -> NamedTempFile {
    let mut contents = headers.join(",");
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join(","));
        contents.push('\n');
    }
    temp_file(&contents, ".csv")
}
