//! Execution strategies for the five aggregate operations.
//!
//! `Aggregator` is the interface the benchmark registry drives. Both
//! implementations share the kernels in [`crate::kernels`]; they differ only
//! in how the dataset is traversed:
//!
//! - `SequentialAggregator` runs each kernel once over the whole slice on the
//!   calling thread.
//! - `ParallelAggregator` runs each kernel per fork-join partition and
//!   combines the partials (addition for reductions, ordered concatenation
//!   for map/filter).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BenchError;
use crate::fork_join::ForkJoin;
use crate::kernels;

/// How an aggregate traverses its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

impl ExecutionMode {
    /// Both modes, sequential first.
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    /// Machine name used in benchmark keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Parallel => "Parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExecutionMode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "parallel" | "par" => Ok(Self::Parallel),
            other => Err(BenchError::UnknownBenchmark(other.to_string())),
        }
    }
}

/// The five aggregate operations, in one execution strategy.
pub trait Aggregator: Send + Sync {
    /// Exact sum of all elements.
    fn sum(&self, data: &[i32]) -> i64;

    /// Sum of `(x - mean)^2` over all elements.
    fn squared_deviations(&self, data: &[i32], mean: f64) -> f64;

    /// `x * 2` for every element, order preserved.
    fn multiply_by_two(&self, data: &[i32]) -> Vec<i32>;

    /// Elements divisible by 2 and 3, order preserved.
    fn filter(&self, data: &[i32]) -> Vec<i32>;

    /// The strategy this aggregator implements.
    fn mode(&self) -> ExecutionMode;

    /// Get the name of this strategy.
    fn name(&self) -> &str;

    /// Number of threads the strategy spreads work across.
    fn workers(&self) -> usize {
        1
    }

    /// Arithmetic mean, or 0 for an empty dataset.
    fn average(&self, data: &[i32]) -> f64 {
        kernels::mean(self.sum(data), data.len())
    }

    /// Population standard deviation, or 0 for an empty dataset.
    ///
    /// Recomputes the average with this same strategy first, so a call costs
    /// two full passes.
    fn std_dev(&self, data: &[i32]) -> f64 {
        let mean = self.average(data);
        kernels::std_dev(self.squared_deviations(data, mean), data.len())
    }
}

/// Single-threaded, single-pass strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialAggregator;

impl SequentialAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for SequentialAggregator {
    fn sum(&self, data: &[i32]) -> i64 {
        kernels::sum(data)
    }

    fn squared_deviations(&self, data: &[i32], mean: f64) -> f64 {
        kernels::squared_deviations(data, mean)
    }

    fn multiply_by_two(&self, data: &[i32]) -> Vec<i32> {
        kernels::double(data)
    }

    fn filter(&self, data: &[i32]) -> Vec<i32> {
        kernels::filter(data)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}

/// Fork-join strategy over a dedicated worker pool.
#[derive(Debug)]
pub struct ParallelAggregator {
    fork_join: ForkJoin,
}

impl ParallelAggregator {
    /// Create a parallel aggregator with its own pool.
    ///
    /// `threads == 0` sizes the pool to the available parallelism.
    pub fn new(threads: usize, min_partition_len: usize) -> Result<Self, BenchError> {
        Ok(Self {
            fork_join: ForkJoin::new(threads, min_partition_len)?,
        })
    }

    /// Wrap an existing fork-join executor.
    #[must_use]
    pub fn with_fork_join(fork_join: ForkJoin) -> Self {
        Self { fork_join }
    }

    #[must_use]
    pub fn fork_join(&self) -> &ForkJoin {
        &self.fork_join
    }
}

impl Aggregator for ParallelAggregator {
    fn sum(&self, data: &[i32]) -> i64 {
        self.fork_join.map_reduce(data, 0, kernels::sum, |a, b| a + b)
    }

    fn squared_deviations(&self, data: &[i32], mean: f64) -> f64 {
        self.fork_join.map_reduce(
            data,
            0.0,
            |part| kernels::squared_deviations(part, mean),
            |a, b| a + b,
        )
    }

    fn multiply_by_two(&self, data: &[i32]) -> Vec<i32> {
        self.fork_join.map_concat(data, kernels::double)
    }

    fn filter(&self, data: &[i32]) -> Vec<i32> {
        self.fork_join.map_concat(data, kernels::filter)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }

    fn name(&self) -> &'static str {
        "Parallel"
    }

    fn workers(&self) -> usize {
        self.fork_join.threads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i32; 6] = [1, 2, 3, 4, 5, 6];

    fn parallel() -> ParallelAggregator {
        // min partition of 1 so small inputs still fan out.
        ParallelAggregator::new(4, 1).unwrap()
    }

    fn strategies() -> Vec<Box<dyn Aggregator>> {
        vec![Box::new(SequentialAggregator::new()), Box::new(parallel())]
    }

    #[test]
    fn sample_results_both_strategies() {
        for agg in strategies() {
            assert_eq!(agg.sum(&SAMPLE), 21, "{}", agg.name());
            assert!((agg.average(&SAMPLE) - 3.5).abs() < 1e-12, "{}", agg.name());
            assert_eq!(agg.multiply_by_two(&SAMPLE), vec![2, 4, 6, 8, 10, 12]);
            assert_eq!(agg.filter(&SAMPLE), vec![6]);
        }
    }

    #[test]
    fn sample_std_dev_both_strategies() {
        let expected = (17.5f64 / 6.0).sqrt();
        for agg in strategies() {
            assert!((agg.std_dev(&SAMPLE) - expected).abs() < 1e-12, "{}", agg.name());
        }
    }

    #[test]
    fn empty_defaults_both_strategies() {
        for agg in strategies() {
            assert_eq!(agg.sum(&[]), 0);
            assert_eq!(agg.average(&[]), 0.0);
            assert_eq!(agg.std_dev(&[]), 0.0);
            assert!(agg.multiply_by_two(&[]).is_empty());
            assert!(agg.filter(&[]).is_empty());
        }
    }

    #[test]
    fn strategies_agree_on_larger_input() {
        let data: Vec<i32> = (0..100_003).map(|i| (i * 37 % 100) + 1).collect();
        let seq = SequentialAggregator::new();
        let par = parallel();

        assert_eq!(seq.sum(&data), par.sum(&data));
        assert_eq!(seq.multiply_by_two(&data), par.multiply_by_two(&data));
        assert_eq!(seq.filter(&data), par.filter(&data));

        let (a, b) = (seq.std_dev(&data), par.std_dev(&data));
        assert!((a - b).abs() <= 1e-6 * a.abs(), "{a} vs {b}");
    }

    #[test]
    fn modes_and_names() {
        assert_eq!(SequentialAggregator::new().mode(), ExecutionMode::Sequential);
        assert_eq!(parallel().mode(), ExecutionMode::Parallel);
        assert_eq!(SequentialAggregator::new().name(), "Sequential");
        assert_eq!(parallel().name(), "Parallel");
    }

    #[test]
    fn workers_per_strategy() {
        assert_eq!(SequentialAggregator::new().workers(), 1);
        assert_eq!(parallel().workers(), 4);
    }

    #[test]
    fn parallel_exposes_pool() {
        let agg = ParallelAggregator::with_fork_join(ForkJoin::new(2, 8).unwrap());
        assert_eq!(agg.fork_join().threads(), 2);
        assert_eq!(agg.fork_join().min_partition_len(), 8);
    }

    #[test]
    fn execution_mode_parse() {
        assert_eq!("sequential".parse::<ExecutionMode>().unwrap(), ExecutionMode::Sequential);
        assert_eq!("PAR".parse::<ExecutionMode>().unwrap(), ExecutionMode::Parallel);
        assert!("serial".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn execution_mode_display() {
        assert_eq!(ExecutionMode::Parallel.to_string(), "parallel");
        assert_eq!(ExecutionMode::Sequential.label(), "Sequential");
    }
}
