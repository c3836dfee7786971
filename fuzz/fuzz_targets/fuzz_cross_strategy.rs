#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;

use streambench_core::strategy::{Aggregator, ParallelAggregator, SequentialAggregator};

fn parallel() -> &'static ParallelAggregator {
    static PARALLEL: OnceLock<ParallelAggregator> = OnceLock::new();
    PARALLEL.get_or_init(|| ParallelAggregator::new(4, 3).unwrap())
}

fuzz_target!(|data: &[u8]| {
    // Map each byte into the dataset range [1, 100]
    let values: Vec<i32> = data.iter().map(|&b| i32::from(b) % 100 + 1).collect();

    let seq = SequentialAggregator::new();
    let par = parallel();

    assert_eq!(seq.sum(&values), par.sum(&values), "sum mismatch");
    assert_eq!(
        seq.multiply_by_two(&values),
        par.multiply_by_two(&values),
        "multiply-by-two mismatch"
    );
    assert_eq!(seq.filter(&values), par.filter(&values), "filter mismatch");

    let (a, b) = (seq.std_dev(&values), par.std_dev(&values));
    assert!((a - b).abs() <= 1e-6 * a.abs().max(b.abs()), "std-dev {a} vs {b}");
});
