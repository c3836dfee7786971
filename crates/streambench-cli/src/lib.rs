//! # streambench-cli
//!
//! CLI output formatting, result presentation, JSON reports, and shell
//! completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use output::{write_report, Report};
pub use presenter::CLIResultPresenter;
