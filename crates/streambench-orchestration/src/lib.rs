//! # streambench-orchestration
//!
//! Benchmark selection, the per-invocation timing runner, and the
//! sequential-versus-parallel cross-check.

pub mod interfaces;
pub mod orchestrator;
pub mod runner;
pub mod selection;

pub use interfaces::{BenchmarkResult, Comparison, Measurement, ResultPresenter};
pub use orchestrator::{
    analyze_comparison_results, compare_results, execute_measurements, execute_summary,
    verify_strategies,
};
pub use selection::get_benchmarks_to_run;
