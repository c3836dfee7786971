//! Error handling and exit codes.

use streambench_core::constants::exit_codes;
use streambench_core::error::BenchError;

/// Map a benchmark error to the process exit code.
pub fn handle_error(err: &BenchError) -> i32 {
    match err {
        BenchError::UnknownBenchmark(_) | BenchError::Config(_) | BenchError::OutOfRange { .. } => {
            exit_codes::ERROR_CONFIG
        }
        BenchError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
        BenchError::Report(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for an application error, looking through `anyhow` context.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BenchError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
