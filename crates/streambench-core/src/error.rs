//! Error type shared by every streambench crate.
//!
//! The aggregate operations themselves are total and never return this type;
//! errors only arise at the edges: selecting benchmarks, validating
//! configuration or snapshots, and cross-checking strategies.

/// Error type for benchmark selection, configuration, and verification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BenchError {
    /// No benchmark, operation, or mode matches the selector.
    #[error("unknown benchmark: {0}")]
    UnknownBenchmark(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A snapshot value lies outside the generator's range.
    #[error("value {value} at index {index} is outside [{min}, {max}]")]
    OutOfRange {
        index: usize,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Sequential and parallel variants of an operation disagree.
    #[error("result mismatch for {operation}: sequential={sequential}, parallel={parallel}")]
    Mismatch {
        operation: String,
        sequential: String,
        parallel: String,
    },

    /// A report could not be produced or written.
    #[error("report error: {0}")]
    Report(String),
}
