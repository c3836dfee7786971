//! CLI result presenter.
//!
//! Rendering is split from printing so the exact lines can be tested.

use streambench_orchestration::interfaces::{
    BenchmarkResult, Comparison, Measurement, ResultPresenter,
};

use crate::output::{format_duration, format_millis, format_number};

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Lines for a one-shot run: `Sum (Sequential): 505012345`.
    #[must_use]
    pub fn render_summary(&self, results: &[BenchmarkResult], preview_len: usize) -> Vec<String> {
        results
            .iter()
            .map(|r| {
                let value = r.output.summary(preview_len);
                if self.quiet {
                    return value;
                }
                let mut line = format!("{}: {value}", r.benchmark.label());
                if self.verbose {
                    if let Some(len) = r.output.len() {
                        line.push_str(&format!(" ({} elements)", format_number(len)));
                    }
                    line.push_str(&format!(" in {}", format_duration(r.duration)));
                }
                line
            })
            .collect()
    }

    /// Table of mean milliseconds per invocation.
    #[must_use]
    pub fn render_measurements(&self, measurements: &[Measurement]) -> Vec<String> {
        if self.quiet {
            return measurements
                .iter()
                .map(|m| format!("{} {}", m.key, format_millis(m.timing.mean)))
                .collect();
        }

        let mut lines = Vec::with_capacity(measurements.len() + 2);
        if let Some(first) = measurements.first() {
            lines.push(format!(
                "Dataset: {} elements, {} invocations per benchmark",
                format_number(first.dataset_len),
                first.timing.iterations
            ));
        }
        if self.verbose {
            lines.push(format!(
                "{:<34} {:>12} {:>12} {:>12} {:>12}",
                "Benchmark", "mean ms/op", "median", "min", "max"
            ));
        } else {
            lines.push(format!("{:<34} {:>12}", "Benchmark", "mean ms/op"));
        }
        lines.push(format!("{:-<60}", ""));

        for m in measurements {
            let label = m.benchmark.label();
            if self.verbose {
                lines.push(format!(
                    "{label:<34} {:>12} {:>12} {:>12} {:>12}",
                    format_millis(m.timing.mean),
                    format_millis(m.timing.median),
                    format_millis(m.timing.min),
                    format_millis(m.timing.max),
                ));
            } else {
                lines.push(format!("{label:<34} {:>12}", format_millis(m.timing.mean)));
            }
        }
        lines
    }

    /// One line per operation with the verification status.
    #[must_use]
    pub fn render_comparisons(&self, comparisons: &[Comparison], preview_len: usize) -> Vec<String> {
        if self.quiet {
            return Vec::new();
        }

        let mut lines = vec![String::from("Verification (sequential vs parallel):")];
        for c in comparisons {
            let status = if c.agrees() { "OK" } else { "MISMATCH" };
            let mut line = format!("  {:<20} [{status}]", c.operation.label());
            if self.verbose || !c.agrees() {
                line.push_str(&format!(
                    " {} | {}",
                    c.sequential.summary(preview_len),
                    c.parallel.summary(preview_len)
                ));
            }
            lines.push(line);
        }
        lines
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_summary(&self, results: &[BenchmarkResult], preview_len: usize) {
        for line in self.render_summary(results, preview_len) {
            println!("{line}");
        }
    }

    fn present_measurements(&self, measurements: &[Measurement]) {
        for line in self.render_measurements(measurements) {
            println!("{line}");
        }
    }

    fn present_comparisons(&self, comparisons: &[Comparison], preview_len: usize) {
        for line in self.render_comparisons(comparisons, preview_len) {
            println!("{line}");
        }
    }

    fn present_error(&self, error: &str) {
        eprintln!("Error: {error}");
    }
}
