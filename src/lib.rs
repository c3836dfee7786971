//! Shared fixtures for the workspace-level integration tests.

use serde::Deserialize;

/// Golden data file: fixed snapshots with their expected aggregates.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    pub description: String,
    pub cases: Vec<GoldenCase>,
}

/// One snapshot and the expected result of every operation on it.
#[derive(Debug, Deserialize)]
pub struct GoldenCase {
    pub name: String,
    pub values: Vec<i32>,
    pub sum: i64,
    pub average: f64,
    pub std_dev: f64,
    pub multiply_by_two: Vec<i32>,
    pub filter: Vec<i32>,
}

/// Load `tests/testdata/aggregates_golden.json`.
pub fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/aggregates_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}
