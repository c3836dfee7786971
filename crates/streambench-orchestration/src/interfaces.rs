//! Orchestration interfaces.

use std::time::Duration;

use serde::Serialize;

use streambench_core::registry::{Benchmark, Operation, Output};

use crate::runner::Timing;

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present one-shot results, one line per benchmark.
    fn present_summary(&self, results: &[BenchmarkResult], preview_len: usize);

    /// Present timing statistics.
    fn present_measurements(&self, measurements: &[Measurement]);

    /// Present sequential-versus-parallel comparisons.
    fn present_comparisons(&self, comparisons: &[Comparison], preview_len: usize);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub benchmark: Benchmark,
    pub output: Output,
    pub duration: Duration,
}

/// Timing statistics for one benchmark over fresh datasets.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub benchmark: Benchmark,
    pub key: String,
    pub dataset_len: usize,
    #[serde(flatten)]
    pub timing: Timing,
}

/// Outcome of running both strategies of an operation on one snapshot.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub operation: Operation,
    pub sequential: Output,
    pub parallel: Output,
}

impl Comparison {
    /// Whether the two strategies agree.
    #[must_use]
    pub fn agrees(&self) -> bool {
        self.sequential.agrees_with(&self.parallel)
    }
}

/// Presenter that discards everything.
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_summary(&self, _results: &[BenchmarkResult], _preview_len: usize) {}
    fn present_measurements(&self, _measurements: &[Measurement]) {}
    fn present_comparisons(&self, _comparisons: &[Comparison], _preview_len: usize) {}
    fn present_error(&self, _error: &str) {}
}
