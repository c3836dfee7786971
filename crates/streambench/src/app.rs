//! Application entry point and dispatch.

use anyhow::Result;

use streambench_cli::output::{write_report, Report};
use streambench_cli::presenter::CLIResultPresenter;
use streambench_core::dataset::{Dataset, DatasetGenerator};
use streambench_core::options::Options;
use streambench_core::registry::{AggregatorFactory, Benchmark, DefaultFactory, Operation};
use streambench_core::strategy::ExecutionMode;
use streambench_orchestration::interfaces::{Comparison, ResultPresenter};
use streambench_orchestration::orchestrator::{
    analyze_comparison_results, compare_results, execute_measurements, execute_summary,
    verify_strategies,
};
use streambench_orchestration::selection::{get_benchmarks_to_run, operations_of};

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        streambench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    config.validate()?;
    let opts = config.options();
    let benchmarks = get_benchmarks_to_run(&config.bench)?;
    let factory = DefaultFactory::new(&opts);
    let generator = dataset_generator(&opts);
    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);

    tracing::info!(
        benchmarks = benchmarks.len(),
        dataset_len = opts.dataset_len,
        threads = opts.threads,
        measure = config.measure,
        "starting run"
    );

    if config.measure {
        run_measure(config, &opts, &benchmarks, &factory, &generator, &presenter)
    } else {
        run_summary(config, &opts, &benchmarks, &factory, &generator, &presenter)
    }
}

fn dataset_generator(opts: &Options) -> DatasetGenerator {
    let generator = DatasetGenerator::with_len(opts.dataset_len);
    match opts.seed {
        Some(seed) => generator.seeded(seed),
        None => generator,
    }
}

/// One dataset, one invocation of every selected benchmark.
fn run_summary(
    config: &AppConfig,
    opts: &Options,
    benchmarks: &[Benchmark],
    factory: &DefaultFactory,
    generator: &DatasetGenerator,
    presenter: &CLIResultPresenter,
) -> Result<()> {
    let data = generator.generate();
    let results = execute_summary(benchmarks, factory, &data)?;
    presenter.present_summary(&results, opts.preview_len);

    let comparisons = if config.verify {
        // Reuse pairs already computed; run the missing mode for the rest.
        let mut comparisons = compare_results(&results);
        let missing: Vec<Operation> = operations_of(benchmarks)
            .into_iter()
            .filter(|op| !comparisons.iter().any(|c| c.operation == *op))
            .collect();
        comparisons.extend(verify_strategies(&missing, factory, &data)?);
        Some(comparisons)
    } else {
        None
    };

    if let Some(ref path) = config.output {
        let report = Report::new(opts.dataset_len, parallel_workers(factory)?, opts.seed)
            .with_summary(&results, opts.preview_len);
        write_report(path, &report)?;
    }

    match comparisons {
        Some(comparisons) => check(&comparisons, opts, presenter),
        None => Ok(()),
    }
}

/// Fresh dataset per invocation, timed.
fn run_measure(
    config: &AppConfig,
    opts: &Options,
    benchmarks: &[Benchmark],
    factory: &DefaultFactory,
    generator: &DatasetGenerator,
    presenter: &CLIResultPresenter,
) -> Result<()> {
    let measurements = execute_measurements(
        benchmarks,
        factory,
        generator,
        config.warmup,
        config.iterations,
    )?;
    presenter.present_measurements(&measurements);

    if let Some(ref path) = config.output {
        let report = Report::new(opts.dataset_len, parallel_workers(factory)?, opts.seed)
            .with_measurements(measurements);
        write_report(path, &report)?;
    }

    if config.verify {
        let data: Dataset = generator.generate();
        let comparisons = verify_strategies(&operations_of(benchmarks), factory, &data)?;
        return check(&comparisons, opts, presenter);
    }

    Ok(())
}

fn check(comparisons: &[Comparison], opts: &Options, presenter: &CLIResultPresenter) -> Result<()> {
    presenter.present_comparisons(comparisons, opts.preview_len);
    analyze_comparison_results(comparisons, opts.preview_len)?;
    Ok(())
}

fn parallel_workers(factory: &DefaultFactory) -> Result<usize> {
    Ok(factory.get(ExecutionMode::Parallel)?.workers())
}
