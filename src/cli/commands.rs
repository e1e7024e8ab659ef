//! Command implementations for the sawit-monitor CLI
//!
//! This module dispatches parsed arguments to the per-command modules and
//! re-exports the shared reporting types. The individual commands live in:
//! - [`report`] - Per-dataset detail reports
//! - [`overview`] - Cross-dataset dashboard overview
//! - [`datasets`] - Registry listing
//! - [`shared`] - Logging setup, configuration loading, progress bars

pub mod datasets;
pub mod overview;
pub mod report;
pub mod shared;

pub use shared::RunStats;

use crate::cli::args::{Args, Commands};
use crate::Result;
use tokio_util::sync::CancellationToken;

/// Run the selected command
///
/// The caller guarantees a subcommand is present (`main` shows the help
/// screen otherwise). The cancellation token aborts in-flight fetches on
/// Ctrl-C.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<RunStats> {
    match args.command {
        Some(Commands::Report(report_args)) => {
            report::run_report(report_args, cancellation_token).await
        }
        Some(Commands::Overview(overview_args)) => {
            overview::run_overview(overview_args, cancellation_token).await
        }
        Some(Commands::Datasets(datasets_args)) => datasets::run_datasets(datasets_args),
        None => Err(crate::Error::configuration(
            "no command given; run with --help for usage",
        )),
    }
}
