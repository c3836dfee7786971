//! Core orchestration: one-shot runs, timed runs, and strategy cross-checks.

use std::time::Instant;

use streambench_core::dataset::{Dataset, DatasetGenerator};
use streambench_core::error::BenchError;
use streambench_core::registry::{AggregatorFactory, Benchmark, Operation};
use streambench_core::strategy::ExecutionMode;

use crate::interfaces::{BenchmarkResult, Comparison, Measurement};
use crate::runner::measure;

/// Run each benchmark once against the same dataset.
pub fn execute_summary(
    benchmarks: &[Benchmark],
    factory: &dyn AggregatorFactory,
    data: &Dataset,
) -> Result<Vec<BenchmarkResult>, BenchError> {
    benchmarks
        .iter()
        .map(|bench| {
            let agg = factory.get(bench.mode)?;
            let start = Instant::now();
            let output = bench.run(agg.as_ref(), data);
            let duration = start.elapsed();
            tracing::debug!(benchmark = %bench, ?duration, "benchmark complete");
            Ok(BenchmarkResult {
                benchmark: *bench,
                output,
                duration,
            })
        })
        .collect()
}

/// Time each benchmark over `iterations` fresh datasets, after `warmup`
/// untimed invocations.
///
/// The generator runs before every invocation and is excluded from the
/// timing, so each call sees a dataset no other call has touched.
pub fn execute_measurements(
    benchmarks: &[Benchmark],
    factory: &dyn AggregatorFactory,
    generator: &DatasetGenerator,
    warmup: u32,
    iterations: u32,
) -> Result<Vec<Measurement>, BenchError> {
    let mut measurements = Vec::with_capacity(benchmarks.len());

    for bench in benchmarks {
        let agg = factory.get(bench.mode)?;
        tracing::info!(benchmark = %bench, warmup, iterations, "measuring");

        let timing = measure(
            warmup,
            iterations,
            || generator.generate(),
            |data| bench.run(agg.as_ref(), data),
        );

        tracing::info!(benchmark = %bench, mean_ms = timing.mean_ms(), "measured");
        measurements.push(Measurement {
            benchmark: *bench,
            key: bench.key(),
            dataset_len: generator.len(),
            timing,
        });
    }

    Ok(measurements)
}

/// Pair the sequential and parallel results of each operation.
///
/// Operations missing either mode are skipped. Pairs follow the order in
/// which each operation first appears.
#[must_use]
pub fn compare_results(results: &[BenchmarkResult]) -> Vec<Comparison> {
    let mut operations: Vec<Operation> = Vec::new();
    for r in results {
        if !operations.contains(&r.benchmark.operation) {
            operations.push(r.benchmark.operation);
        }
    }

    let output_of = |op: Operation, mode: ExecutionMode| {
        results
            .iter()
            .find(|r| r.benchmark.operation == op && r.benchmark.mode == mode)
            .map(|r| r.output.clone())
    };

    operations
        .into_iter()
        .filter_map(|op| {
            Some(Comparison {
                operation: op,
                sequential: output_of(op, ExecutionMode::Sequential)?,
                parallel: output_of(op, ExecutionMode::Parallel)?,
            })
        })
        .collect()
}

/// Run both strategies of every operation on `data` and pair the outputs.
pub fn verify_strategies(
    operations: &[Operation],
    factory: &dyn AggregatorFactory,
    data: &Dataset,
) -> Result<Vec<Comparison>, BenchError> {
    let benchmarks: Vec<Benchmark> = operations
        .iter()
        .flat_map(|&op| ExecutionMode::ALL.map(|mode| Benchmark::new(op, mode)))
        .collect();
    let results = execute_summary(&benchmarks, factory, data)?;
    Ok(compare_results(&results))
}

/// Analyze comparisons, failing on the first disagreement.
pub fn analyze_comparison_results(
    comparisons: &[Comparison],
    preview_len: usize,
) -> Result<(), BenchError> {
    if let Some(c) = comparisons.iter().find(|c| !c.agrees()) {
        tracing::warn!(operation = %c.operation, "strategies disagree");
        return Err(BenchError::Mismatch {
            operation: c.operation.name().to_string(),
            sequential: c.sequential.summary(preview_len),
            parallel: c.parallel.summary(preview_len),
        });
    }
    Ok(())
}
