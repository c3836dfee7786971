//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use streambench_core::constants::{DATASET_LEN, DEFAULT_MIN_PARTITION_LEN, DEFAULT_PREVIEW_LEN};
use streambench_core::error::BenchError;
use streambench_core::options::Options;

/// streambench: sequential versus parallel aggregate benchmarks.
///
/// Without --measure, generates one dataset and prints the result of each
/// selected benchmark. With --measure, times each benchmark over freshly
/// generated datasets and reports milliseconds per invocation.
#[derive(Parser, Debug)]
#[command(name = "streambench", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of elements per generated dataset.
    #[arg(short = 'n', long, default_value_t = DATASET_LEN, env = "STREAMBENCH_LEN")]
    pub len: usize,

    /// Benchmarks to run: all, sequential, parallel, an operation
    /// (sum, average, std-dev, multiply-by-two, filter) or <operation>/<mode>.
    /// Comma-separated lists are accepted.
    #[arg(short, long, default_value = "all")]
    pub bench: String,

    /// Time each benchmark over fresh datasets.
    #[arg(short, long)]
    pub measure: bool,

    /// Timed invocations per benchmark (with --measure).
    #[arg(short, long, default_value_t = 5)]
    pub iterations: u32,

    /// Untimed warm-up invocations per benchmark (with --measure).
    #[arg(long, default_value_t = 1)]
    pub warmup: u32,

    /// Worker threads for parallel benchmarks (0 = available parallelism).
    #[arg(short, long, default_value_t = 0, env = "STREAMBENCH_THREADS")]
    pub threads: usize,

    /// Minimum number of elements per parallel partition.
    #[arg(long, default_value_t = DEFAULT_MIN_PARTITION_LEN)]
    pub min_partition: usize,

    /// Seed for reproducible datasets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Check that sequential and parallel results agree.
    #[arg(long)]
    pub verify: bool,

    /// Number of leading elements printed for sequence results.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LEN)]
    pub preview: usize,

    /// Write a JSON report to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode (only output values).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.len == 0 {
            return Err(BenchError::Config("--len must be greater than zero".into()));
        }
        if self.measure && self.iterations == 0 {
            return Err(BenchError::Config(
                "--iterations must be greater than zero".into(),
            ));
        }
        if self.min_partition == 0 {
            return Err(BenchError::Config(
                "--min-partition must be greater than zero".into(),
            ));
        }
        if self.preview == 0 {
            return Err(BenchError::Config("--preview must be greater than zero".into()));
        }
        Ok(())
    }

    /// Core options for this configuration.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            dataset_len: self.len,
            threads: self.threads,
            min_partition_len: self.min_partition,
            preview_len: self.preview,
            seed: self.seed,
        }
        .normalize()
    }
}
