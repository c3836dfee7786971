//! CLI output formatting and JSON reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use streambench_core::error::BenchError;
use streambench_orchestration::interfaces::{BenchmarkResult, Measurement};

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a duration as milliseconds with three decimals.
#[must_use]
pub fn format_millis(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64() * 1000.0)
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// One line of a one-shot run, as exported in a report.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
    pub duration_ms: f64,
}

impl SummaryEntry {
    #[must_use]
    pub fn from_result(result: &BenchmarkResult, preview_len: usize) -> Self {
        Self {
            key: result.benchmark.key(),
            label: result.benchmark.label(),
            value: result.output.summary(preview_len),
            len: result.output.len(),
            duration_ms: result.duration.as_secs_f64() * 1000.0,
        }
    }
}

/// JSON report of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub version: &'static str,
    pub dataset_len: usize,
    pub threads: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<SummaryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<Measurement>,
}

impl Report {
    #[must_use]
    pub fn new(dataset_len: usize, threads: usize, seed: Option<u64>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            dataset_len,
            threads,
            seed,
            summary: Vec::new(),
            measurements: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, results: &[BenchmarkResult], preview_len: usize) -> Self {
        self.summary = results
            .iter()
            .map(|r| SummaryEntry::from_result(r, preview_len))
            .collect();
        self
    }

    #[must_use]
    pub fn with_measurements(mut self, measurements: Vec<Measurement>) -> Self {
        self.measurements = measurements;
        self
    }
}

/// Write a report to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, report: &Report) -> Result<(), BenchError> {
    let file = File::create(path)
        .map_err(|e| BenchError::Report(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| BenchError::Report(e.to_string()))?;
    writeln!(writer).map_err(|e| BenchError::Report(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| BenchError::Report(e.to_string()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streambench_core::registry::{Benchmark, Operation, Output};
    use streambench_core::strategy::ExecutionMode;
    use streambench_orchestration::runner::Timing;

    fn filter_result() -> BenchmarkResult {
        BenchmarkResult {
            benchmark: Benchmark::new(Operation::Filter, ExecutionMode::Parallel),
            output: Output::Sequence(vec![6, 12, 18, 24]),
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn format_duration_micro() {
        let s = format_duration(Duration::from_nanos(500));
        assert!(s.contains("µs"));
    }

    #[test]
    fn format_duration_milli() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42.00ms");
    }

    #[test]
    fn format_duration_seconds() {
        assert_eq!(format_duration(Duration::from_millis(3_140)), "3.140s");
    }

    #[test]
    fn format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn format_millis_three_decimals() {
        assert_eq!(format_millis(Duration::from_micros(12_345)), "12.345");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(10_000_000), "10,000,000");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1234), "1,234");
    }

    #[test]
    fn summary_entry_from_result() {
        let entry = SummaryEntry::from_result(&filter_result(), 2);
        assert_eq!(entry.key, "filter/parallel");
        assert_eq!(entry.label, "Filtered (Parallel)");
        assert_eq!(entry.value, "[6, 12]");
        assert_eq!(entry.len, Some(4));
    }

    #[test]
    fn write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let bench = Benchmark::new(Operation::Sum, ExecutionMode::Sequential);
        let report = Report::new(1_000, 4, Some(9))
            .with_summary(&[filter_result()], 10)
            .with_measurements(vec![Measurement {
                benchmark: bench,
                key: bench.key(),
                dataset_len: 1_000,
                timing: Timing::from_durations(vec![Duration::from_millis(1)]),
            }]);
        write_report(&path, &report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["dataset_len"], 1_000);
        assert_eq!(json["threads"], 4);
        assert_eq!(json["seed"], 9);
        assert_eq!(json["summary"][0]["value"], "[6, 12, 18, 24]");
        assert_eq!(json["measurements"][0]["key"], "sum/sequential");
    }

    #[test]
    fn report_omits_empty_sections() {
        let json = serde_json::to_value(Report::new(10, 1, None)).unwrap();
        assert!(json.get("summary").is_none());
        assert!(json.get("measurements").is_none());
        assert!(json.get("seed").is_none());
    }

    #[test]
    fn write_report_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = write_report(&path, &Report::new(10, 1, None)).unwrap_err();
        assert!(matches!(err, BenchError::Report(_)));
    }
}
