//! Property-based tests for the aggregate operations.
//!
//! These exercise both strategies on arbitrary in-range snapshots and check
//! that the parallel fork-join results match the sequential ones.

use std::sync::OnceLock;

use proptest::prelude::*;

use streambench_core::dataset::{Dataset, DatasetGenerator};
use streambench_core::kernels;
use streambench_core::strategy::{Aggregator, ParallelAggregator, SequentialAggregator};
use streambench_core::{VALUE_MAX, VALUE_MIN};

fn parallel() -> &'static ParallelAggregator {
    static PARALLEL: OnceLock<ParallelAggregator> = OnceLock::new();
    // Small partitions so even short inputs are split across workers.
    PARALLEL.get_or_init(|| ParallelAggregator::new(4, 7).unwrap())
}

fn snapshot() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(VALUE_MIN..=VALUE_MAX, 0..5_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Integer sums are bit-exact across strategies.
    #[test]
    fn sum_is_exact_across_strategies(data in snapshot()) {
        let seq = SequentialAggregator::new();
        prop_assert_eq!(seq.sum(&data), parallel().sum(&data));
        prop_assert_eq!(seq.sum(&data), data.iter().map(|&x| i64::from(x)).sum::<i64>());
    }

    /// Averages and standard deviations agree within reassociation tolerance.
    #[test]
    fn float_results_agree(data in snapshot()) {
        let seq = SequentialAggregator::new();
        let (a, b) = (seq.average(&data), parallel().average(&data));
        prop_assert!((a - b).abs() <= 1e-6 * a.abs().max(b.abs()), "average {} vs {}", a, b);

        let (a, b) = (seq.std_dev(&data), parallel().std_dev(&data));
        prop_assert!((a - b).abs() <= 1e-6 * a.abs().max(b.abs()), "std-dev {} vs {}", a, b);
    }

    /// Doubling maps every element in place, in both strategies.
    #[test]
    fn multiply_by_two_is_elementwise(data in snapshot()) {
        for out in [SequentialAggregator::new().multiply_by_two(&data), parallel().multiply_by_two(&data)] {
            prop_assert_eq!(out.len(), data.len());
            for (i, (&x, &y)) in data.iter().zip(&out).enumerate() {
                prop_assert_eq!(y, x * 2, "index {}", i);
            }
        }
    }

    /// Filtering keeps exactly the multiples of 6, in original order.
    #[test]
    fn filter_keeps_multiples_of_six_in_order(data in snapshot()) {
        let expected: Vec<i32> = data.iter().copied().filter(|x| x % 6 == 0).collect();
        prop_assert_eq!(&SequentialAggregator::new().filter(&data), &expected);
        prop_assert_eq!(&parallel().filter(&data), &expected);
    }

    /// Running an aggregate twice on the same snapshot gives identical results.
    #[test]
    fn aggregates_are_idempotent(data in snapshot()) {
        let par = parallel();
        prop_assert_eq!(par.sum(&data), par.sum(&data));
        prop_assert_eq!(par.average(&data).to_bits(), par.average(&data).to_bits());
        prop_assert_eq!(par.std_dev(&data).to_bits(), par.std_dev(&data).to_bits());
        prop_assert_eq!(par.filter(&data), par.filter(&data));
    }

    /// Snapshots inside the range are accepted; one stray value is rejected.
    #[test]
    fn dataset_validation(data in snapshot(), bad in prop_oneof![i32::MIN..VALUE_MIN, (VALUE_MAX + 1)..=i32::MAX]) {
        prop_assert!(Dataset::from_values(data.clone()).is_ok());
        let mut with_bad = data;
        with_bad.push(bad);
        prop_assert!(Dataset::from_values(with_bad).is_err());
    }

    /// Seeded generation honours the length and range invariants.
    #[test]
    fn generated_values_in_range(len in 0usize..20_000, seed in any::<u64>()) {
        let data = DatasetGenerator::with_len(len).seeded(seed).generate();
        prop_assert_eq!(data.len(), len);
        prop_assert!(data.as_slice().iter().all(|v| (VALUE_MIN..=VALUE_MAX).contains(v)));
    }
}

#[test]
fn reference_examples() {
    let data = [1, 2, 3, 4, 5, 6];
    let aggregators: [&dyn Aggregator; 2] = [&SequentialAggregator, parallel()];
    for agg in aggregators {
        assert_eq!(agg.sum(&data), 21);
        assert!((agg.average(&data) - 3.5).abs() < f64::EPSILON);
        assert_eq!(agg.multiply_by_two(&data), vec![2, 4, 6, 8, 10, 12]);
        assert_eq!(agg.filter(&data), vec![6]);

        assert_eq!(agg.average(&[]), 0.0);
        assert_eq!(agg.std_dev(&[]), 0.0);
        assert!(agg.filter(&[]).is_empty());
    }
}

#[test]
fn std_dev_matches_two_pass_definition() {
    let data: Vec<i32> = (1..=100).collect();
    let mean = kernels::mean(kernels::sum(&data), data.len());
    let expected = kernels::std_dev(kernels::squared_deviations(&data, mean), data.len());
    assert!((parallel().std_dev(&data) - expected).abs() < 1e-9);
    // Population std-dev of 1..=100 is sqrt((100^2 - 1) / 12).
    assert!((expected - (9_999f64 / 12.0).sqrt()).abs() < 1e-9);
}

#[test]
fn full_size_dataset_invariants() {
    let data = DatasetGenerator::new().generate();
    assert_eq!(data.len(), streambench_core::DATASET_LEN);
    assert!(data.as_slice().iter().all(|v| (VALUE_MIN..=VALUE_MAX).contains(v)));

    let seq = SequentialAggregator::new();
    assert_eq!(seq.sum(data.as_slice()), parallel().sum(data.as_slice()));
}
