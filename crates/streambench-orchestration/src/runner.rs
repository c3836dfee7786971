//! Timing runner with an untimed setup step before every invocation.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// Run `routine` once per iteration on a fresh input from `setup`.
///
/// `setup` runs before every invocation, warm-ups included, and is not timed.
/// The routine's output is dropped after the clock stops, and the input is
/// dropped after that.
pub fn measure<I, O, S, F>(
    warmup_iters: u32,
    measure_iters: u32,
    mut setup: S,
    mut routine: F,
) -> Timing
where
    S: FnMut() -> I,
    F: FnMut(&I) -> O,
{
    // Warmup
    for _ in 0..warmup_iters {
        let input = setup();
        black_box(routine(&input));
    }

    // Measure
    let mut durations = Vec::with_capacity(measure_iters as usize);
    for _ in 0..measure_iters {
        let input = setup();
        let start = Instant::now();
        let output = routine(&input);
        durations.push(start.elapsed());
        black_box(output);
    }

    Timing::from_durations(durations)
}

/// Timing statistics over a set of invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timing {
    #[serde(rename = "mean_ms", serialize_with = "as_millis")]
    pub mean: Duration,
    #[serde(rename = "median_ms", serialize_with = "as_millis")]
    pub median: Duration,
    #[serde(rename = "min_ms", serialize_with = "as_millis")]
    pub min: Duration,
    #[serde(rename = "max_ms", serialize_with = "as_millis")]
    pub max: Duration,
    pub iterations: u32,
}

impl Timing {
    /// Summarise raw durations. An empty set yields all-zero statistics.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_durations(mut durations: Vec<Duration>) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        durations.sort();
        let iterations = durations.len() as u32;
        let min = durations[0];
        let max = durations[durations.len() - 1];
        let median = if durations.len() % 2 == 1 {
            durations[durations.len() / 2]
        } else {
            let mid = durations.len() / 2;
            (durations[mid - 1] + durations[mid]) / 2
        };
        let total: Duration = durations.iter().sum();

        Self {
            mean: total / iterations,
            median,
            min,
            max,
            iterations,
        }
    }

    /// Mean time per invocation in milliseconds.
    #[must_use]
    pub fn mean_ms(&self) -> f64 {
        self.mean.as_secs_f64() * 1000.0
    }
}

fn as_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}
