//! Per-slice kernels shared by both execution strategies.
//!
//! The sequential strategy applies a kernel to the whole dataset; the parallel
//! strategy applies the same kernel to each fork-join partition and combines
//! the partial results. Keeping one definition per operation is what makes the
//! two strategies comparable.

/// Exact integer sum.
#[must_use]
pub fn sum(values: &[i32]) -> i64 {
    values.iter().map(|&x| i64::from(x)).sum()
}

/// Sum of `(x - mean)^2`.
#[must_use]
pub fn squared_deviations(values: &[i32], mean: f64) -> f64 {
    values
        .iter()
        .map(|&x| {
            let d = f64::from(x) - mean;
            d * d
        })
        .sum()
}

/// `x * 2` for every element, in order.
#[must_use]
pub fn double(values: &[i32]) -> Vec<i32> {
    // Wrapping keeps the kernel total for slices outside the dataset range.
    values.iter().map(|&x| x.wrapping_mul(2)).collect()
}

/// Filter predicate: divisible by both 2 and 3.
#[inline]
#[must_use]
pub fn keeps(x: i32) -> bool {
    x % 2 == 0 && x % 3 == 0
}

/// Elements accepted by [`keeps`], in order.
#[must_use]
pub fn filter(values: &[i32]) -> Vec<i32> {
    values.iter().copied().filter(|&x| keeps(x)).collect()
}

/// `sum / count`, or 0 for an empty dataset.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(sum: i64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Population standard deviation from a sum of squared deviations, or 0 for
/// an empty dataset.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn std_dev(squared_deviations: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        (squared_deviations / count as f64).sqrt()
    }
}
