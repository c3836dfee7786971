//! Benchmark selection logic.

use streambench_core::error::BenchError;
use streambench_core::registry::{Benchmark, Operation};
use streambench_core::strategy::ExecutionMode;

/// Resolve a selector into the benchmarks to run.
///
/// A selector is a comma-separated list of tokens. Each token is `all`, a
/// mode (`sequential`, `parallel`), an operation (both modes), or an exact
/// `<operation>/<mode>` key. Order is preserved and duplicates are dropped.
pub fn get_benchmarks_to_run(selector: &str) -> Result<Vec<Benchmark>, BenchError> {
    let mut selected: Vec<Benchmark> = Vec::new();

    for token in selector.split(',').map(str::trim) {
        if token.is_empty() {
            return Err(BenchError::Config(format!(
                "empty entry in benchmark selector {selector:?}"
            )));
        }
        for bench in resolve_token(token)? {
            if !selected.contains(&bench) {
                selected.push(bench);
            }
        }
    }

    Ok(selected)
}

fn resolve_token(token: &str) -> Result<Vec<Benchmark>, BenchError> {
    if token.eq_ignore_ascii_case("all") {
        return Ok(Benchmark::all());
    }
    if token.contains('/') {
        return Ok(vec![token.parse::<Benchmark>()?]);
    }
    if let Ok(mode) = token.parse::<ExecutionMode>() {
        return Ok(Operation::ALL
            .iter()
            .map(|&op| Benchmark::new(op, mode))
            .collect());
    }
    if let Ok(op) = token.parse::<Operation>() {
        return Ok(ExecutionMode::ALL
            .iter()
            .map(|&mode| Benchmark::new(op, mode))
            .collect());
    }
    Err(BenchError::UnknownBenchmark(token.to_string()))
}

/// Distinct operations among `benchmarks`, in first-seen order.
#[must_use]
pub fn operations_of(benchmarks: &[Benchmark]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for bench in benchmarks {
        if !ops.contains(&bench.operation) {
            ops.push(bench.operation);
        }
    }
    ops
}
