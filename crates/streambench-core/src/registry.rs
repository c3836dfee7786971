//! Benchmark catalogue and aggregator factory.
//!
//! A `Benchmark` pairs one of the five operations with an execution mode,
//! giving the ten invocable units. `DefaultFactory` hands out one shared
//! aggregator per mode so the parallel worker pool is built once per run.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::constants::FLOAT_REL_TOLERANCE;
use crate::dataset::Dataset;
use crate::error::BenchError;
use crate::options::Options;
use crate::strategy::{Aggregator, ExecutionMode, ParallelAggregator, SequentialAggregator};

/// The five aggregate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Sum,
    Average,
    StdDev,
    MultiplyByTwo,
    Filter,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Sum,
        Operation::Average,
        Operation::StdDev,
        Operation::MultiplyByTwo,
        Operation::Filter,
    ];

    /// Machine name used in benchmark keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
            Self::StdDev => "std-dev",
            Self::MultiplyByTwo => "multiply-by-two",
            Self::Filter => "filter",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sum => "Sum",
            Self::Average => "Average",
            Self::StdDev => "Standard Deviation",
            Self::MultiplyByTwo => "Multiply by 2",
            Self::Filter => "Filtered",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "average" | "avg" | "mean" => Ok(Self::Average),
            "std-dev" | "stddev" | "std_dev" => Ok(Self::StdDev),
            "multiply-by-two" | "multiply" | "double" => Ok(Self::MultiplyByTwo),
            "filter" => Ok(Self::Filter),
            other => Err(BenchError::UnknownBenchmark(other.to_string())),
        }
    }
}

/// Result of one aggregate invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Integer(i64),
    Float(f64),
    Sequence(Vec<i32>),
}

impl Output {
    /// Short rendering: the value itself, or the first `preview_len`
    /// elements of a sequence.
    #[must_use]
    pub fn summary(&self, preview_len: usize) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Sequence(v) => format!("{:?}", &v[..preview_len.min(v.len())]),
        }
    }

    /// Number of elements for sequence outputs.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Sequence(v) => Some(v.len()),
            Self::Integer(_) | Self::Float(_) => None,
        }
    }

    /// Whether two outputs describe the same result.
    ///
    /// Integers and sequences must be identical; floats may differ by
    /// [`FLOAT_REL_TOLERANCE`] relative to the larger magnitude.
    #[must_use]
    pub fn agrees_with(&self, other: &Output) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                a == b || (a - b).abs() <= FLOAT_REL_TOLERANCE * a.abs().max(b.abs())
            }
            _ => false,
        }
    }
}

/// One invocable benchmark: an operation in an execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Benchmark {
    pub operation: Operation,
    pub mode: ExecutionMode,
}

impl Benchmark {
    #[must_use]
    pub fn new(operation: Operation, mode: ExecutionMode) -> Self {
        Self { operation, mode }
    }

    /// All ten benchmarks: every sequential operation, then every parallel one.
    #[must_use]
    pub fn all() -> Vec<Benchmark> {
        ExecutionMode::ALL
            .iter()
            .flat_map(|&mode| Operation::ALL.iter().map(move |&op| Self::new(op, mode)))
            .collect()
    }

    /// Key of the form `<operation>/<mode>`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.operation.name(), self.mode.name())
    }

    /// Label of the form `Sum (Sequential)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.operation.label(), self.mode.label())
    }

    /// Run this benchmark's operation on `data` with `aggregator`.
    pub fn run(&self, aggregator: &dyn Aggregator, data: &Dataset) -> Output {
        debug_assert_eq!(aggregator.mode(), self.mode);
        let values = data.as_slice();
        match self.operation {
            Operation::Sum => Output::Integer(aggregator.sum(values)),
            Operation::Average => Output::Float(aggregator.average(values)),
            Operation::StdDev => Output::Float(aggregator.std_dev(values)),
            Operation::MultiplyByTwo => Output::Sequence(aggregator.multiply_by_two(values)),
            Operation::Filter => Output::Sequence(aggregator.filter(values)),
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.operation.name(), self.mode.name())
    }
}

impl FromStr for Benchmark {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, mode) = s
            .split_once('/')
            .ok_or_else(|| BenchError::UnknownBenchmark(s.to_string()))?;
        Ok(Self::new(op.parse()?, mode.parse()?))
    }
}

/// Factory trait for obtaining aggregators.
pub trait AggregatorFactory: Send + Sync {
    /// Get or create the aggregator for `mode`.
    fn get(&self, mode: ExecutionMode) -> Result<Arc<dyn Aggregator>, BenchError>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    threads: usize,
    min_partition_len: usize,
    cache: RwLock<HashMap<ExecutionMode, Arc<dyn Aggregator>>>,
}

impl DefaultFactory {
    /// Create a factory using the thread and partition settings in `opts`.
    #[must_use]
    pub fn new(opts: &Options) -> Self {
        Self {
            threads: opts.threads,
            min_partition_len: opts.min_partition_len,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_aggregator(&self, mode: ExecutionMode) -> Result<Arc<dyn Aggregator>, BenchError> {
        match mode {
            ExecutionMode::Sequential => Ok(Arc::new(SequentialAggregator::new())),
            ExecutionMode::Parallel => Ok(Arc::new(ParallelAggregator::new(
                self.threads,
                self.min_partition_len,
            )?)),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl AggregatorFactory for DefaultFactory {
    fn get(&self, mode: ExecutionMode) -> Result<Arc<dyn Aggregator>, BenchError> {
        // Check cache first
        if let Some(agg) = self.cache.read().get(&mode) {
            return Ok(Arc::clone(agg));
        }

        // Create and cache
        let agg = self.create_aggregator(mode)?;
        self.cache.write().insert(mode, Arc::clone(&agg));
        Ok(agg)
    }
}
