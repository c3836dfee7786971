//! Workload and execution options.

use crate::constants::{DATASET_LEN, DEFAULT_MIN_PARTITION_LEN, DEFAULT_PREVIEW_LEN};

/// Options for generating datasets and running aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Number of elements per generated dataset.
    pub dataset_len: usize,
    /// Worker threads for the parallel strategy (0 = available parallelism).
    pub threads: usize,
    /// Minimum partition length for fork-join fan-out.
    pub min_partition_len: usize,
    /// Leading elements shown for sequence results.
    pub preview_len: usize,
    /// Seed for reproducible datasets (`None` = OS entropy per dataset).
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dataset_len: DATASET_LEN,
            threads: 0,
            min_partition_len: DEFAULT_MIN_PARTITION_LEN,
            preview_len: DEFAULT_PREVIEW_LEN,
            seed: None,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    ///
    /// `threads` stays zero; the worker pool resolves it to the available
    /// parallelism when it is built.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.dataset_len == 0 {
            self.dataset_len = DATASET_LEN;
        }
        if self.min_partition_len == 0 {
            self.min_partition_len = DEFAULT_MIN_PARTITION_LEN;
        }
        if self.preview_len == 0 {
            self.preview_len = DEFAULT_PREVIEW_LEN;
        }
        self
    }
}
