//! # streambench-core
//!
//! Core library for the streambench harness: the dataset generator, the
//! fork-join executor, and the five aggregate operations (sum, average,
//! standard deviation, multiply-by-two, filter) in sequential and parallel
//! form.

pub mod constants;
pub mod dataset;
pub mod error;
pub mod fork_join;
pub mod kernels;
pub mod options;
pub mod registry;
pub mod strategy;

// Re-exports
pub use constants::{exit_codes, DATASET_LEN, DEFAULT_MIN_PARTITION_LEN, VALUE_MAX, VALUE_MIN};
pub use dataset::{Dataset, DatasetGenerator};
pub use error::BenchError;
pub use fork_join::ForkJoin;
pub use options::Options;
pub use registry::{AggregatorFactory, Benchmark, DefaultFactory, Operation, Output};
pub use strategy::{Aggregator, ExecutionMode, ParallelAggregator, SequentialAggregator};

/// Run every benchmark once against the same dataset.
///
/// This is a convenience function for simple use cases; the orchestration
/// crate adds timing, selection, and verification.
///
/// # Example
/// ```
/// use streambench_core::{run_all, Dataset, Output};
///
/// let data = Dataset::from_values(vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let results = run_all(&data).unwrap();
/// assert_eq!(results.len(), 10);
/// assert_eq!(results[0].1, Output::Integer(21));
/// ```
pub fn run_all(data: &Dataset) -> Result<Vec<(Benchmark, Output)>, BenchError> {
    let factory = DefaultFactory::default();
    Benchmark::all()
        .into_iter()
        .map(|bench| {
            let agg = factory.get(bench.mode)?;
            Ok((bench, bench.run(agg.as_ref(), data)))
        })
        .collect()
}
