//! Workload constants and exit codes.

/// Number of elements in a benchmark dataset.
pub const DATASET_LEN: usize = 10_000_000;

/// Smallest value the generator produces (inclusive).
pub const VALUE_MIN: i32 = 1;

/// Largest value the generator produces (inclusive).
pub const VALUE_MAX: i32 = 100;

/// Partitions shorter than this are merged before fan-out.
pub const DEFAULT_MIN_PARTITION_LEN: usize = 16_384;

/// Number of leading elements shown when a sequence result is printed.
pub const DEFAULT_PREVIEW_LEN: usize = 10;

/// Relative tolerance when comparing floating-point results across strategies.
pub const FLOAT_REL_TOLERANCE: f64 = 1e-6;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Sequential and parallel results disagreed during verification.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
