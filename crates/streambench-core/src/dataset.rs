//! Dataset type and the generator that produces a fresh one per invocation.
//!
//! A `Dataset` is owned by exactly one benchmark invocation: the driver asks
//! the `DatasetGenerator` for a new value before every measured call and drops
//! it afterwards. Nothing holds a dataset across invocations.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DATASET_LEN, VALUE_MAX, VALUE_MIN};
use crate::error::BenchError;

/// An ordered sequence of integers in `[VALUE_MIN, VALUE_MAX]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    values: Vec<i32>,
}

impl Dataset {
    /// Build a dataset from explicit values, checking the range invariant.
    pub fn from_values(values: Vec<i32>) -> Result<Self, BenchError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(VALUE_MIN..=VALUE_MAX).contains(*v))
        {
            return Err(BenchError::OutOfRange {
                index,
                value,
                min: VALUE_MIN,
                max: VALUE_MAX,
            });
        }
        Ok(Self { values })
    }

    /// The empty dataset.
    #[must_use]
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the dataset and return its values.
    #[must_use]
    pub fn into_values(self) -> Vec<i32> {
        self.values
    }
}

impl AsRef<[i32]> for Dataset {
    fn as_ref(&self) -> &[i32] {
        &self.values
    }
}

/// Factory for datasets: one call per measured invocation.
///
/// Without a seed every call draws from a fresh OS-seeded source. With a seed,
/// call `k` uses a source seeded from `seed + k`, so successive datasets still
/// differ while a whole run stays reproducible.
#[derive(Debug)]
pub struct DatasetGenerator {
    len: usize,
    seed: Option<u64>,
    generated: AtomicU64,
}

impl DatasetGenerator {
    /// Generator for the default workload size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_len(DATASET_LEN)
    }

    /// Generator for a custom workload size.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            seed: None,
            generated: AtomicU64::new(0),
        }
    }

    /// Make the generated sequence of datasets reproducible.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elements in each generated dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of datasets produced so far.
    #[must_use]
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    /// Produce a fresh dataset of uniformly distributed values.
    #[must_use]
    pub fn generate(&self) -> Dataset {
        let call = self.generated.fetch_add(1, Ordering::Relaxed);
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(call)),
            None => StdRng::from_entropy(),
        };
        let values: Vec<i32> = rng
            .sample_iter(Uniform::new_inclusive(VALUE_MIN, VALUE_MAX))
            .take(self.len)
            .collect();
        tracing::debug!(len = self.len, call, seeded = self.seed.is_some(), "generated dataset");
        Dataset { values }
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}
