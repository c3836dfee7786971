//! streambench: sequential versus parallel aggregate benchmarks.

use streambench_lib::{app, config, errors};

fn main() {
    // Parse CLI args first so -v can raise the log level
    let config = config::AppConfig::parse();

    // Initialize tracing
    let level = if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = app::run(&config) {
        eprintln!("Error: {err:#}");
        std::process::exit(errors::exit_code(&err));
    }
}
