//! Command-line argument definitions for sawit-monitor
//!
//! This module defines the complete CLI interface using the clap derive
//! API. Each subcommand owns its argument struct plus the semantic
//! validation clap cannot express.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sawit production monitor
///
/// Fetches palm oil production datasets from Google Sheets through the
/// configured proxy and renders per-dataset reports or the cross-dataset
/// overview in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sawit-monitor",
    version,
    about = "Monitor palm oil production data served from Google Sheets",
    long_about = "A terminal monitoring tool for palm oil production data published \
                  through Google Sheets. Datasets are fetched as JSON from an Apps Script \
                  proxy, classified into category and numeric columns, and rendered as \
                  chart series, totals, and data tables in human, JSON, or CSV form."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the monitor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Render detailed reports for one or more datasets
    Report(ReportArgs),
    /// Render the cross-dataset overview with metric means and insight
    Overview(OverviewArgs),
    /// List the configured dataset registry
    Datasets(DatasetsArgs),
}

/// Arguments for the report command (per-dataset detail)
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Datasets to report on
    ///
    /// Registry names as listed by the `datasets` command. When omitted,
    /// every configured dataset is reported in registry order.
    #[arg(value_name = "DATASET", help = "Datasets to report on (default: all configured)")]
    pub datasets: Vec<String>,

    /// Sheet proxy endpoint override
    ///
    /// Replaces the configured Apps Script URL for this invocation.
    #[arg(long = "endpoint", value_name = "URL", help = "Sheet proxy endpoint override")]
    pub endpoint: Option<String>,

    /// Fetch timeout override in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Fetch timeout override in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Maximum data table rows in human output
    ///
    /// Chart series and totals are always complete; this only bounds the
    /// trailing data table.
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "ROWS",
        help = "Maximum data table rows in human output"
    )]
    pub limit: Option<usize>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/sawit-monitor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logs and progress except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ReportArgs {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(Error::configuration("--limit must be at least 1"));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::configuration("--timeout must be at least 1 second"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(Error::configuration(format!(
                    "--endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }
        Ok(())
    }

    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

/// Arguments for the overview command (cross-dataset dashboard)
#[derive(Debug, Clone, Parser)]
pub struct OverviewArgs {
    /// Sheet proxy endpoint override
    #[arg(long = "endpoint", value_name = "URL", help = "Sheet proxy endpoint override")]
    pub endpoint: Option<String>,

    /// Fetch timeout override in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Fetch timeout override in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logs and progress except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl OverviewArgs {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(Error::configuration("--timeout must be at least 1 second"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(Error::configuration(format!(
                    "--endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }
        Ok(())
    }

    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

/// Arguments for the datasets command (registry listing)
#[derive(Debug, Clone, Parser)]
pub struct DatasetsArgs {
    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Output format for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal report
    Human,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

/// Map verbosity flags onto a tracing level name
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_args_reject_zero_limit() {
        let args = Args::parse_from(["sawit-monitor", "report", "--limit", "0"]);
        let Some(Commands::Report(report_args)) = args.command else {
            panic!("expected report subcommand");
        };
        assert!(report_args.validate().is_err());
    }

    #[test]
    fn test_report_args_reject_non_http_endpoint() {
        let args = Args::parse_from(["sawit-monitor", "report", "--endpoint", "file:///x"]);
        let Some(Commands::Report(report_args)) = args.command else {
            panic!("expected report subcommand");
        };
        assert!(report_args.validate().is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["sawit-monitor", "report", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(1, false), "info");
        assert_eq!(log_level(2, false), "debug");
        assert_eq!(log_level(5, false), "trace");
        assert_eq!(log_level(3, true), "error");
    }

    #[test]
    fn test_positional_datasets_are_collected() {
        let args = Args::parse_from(["sawit-monitor", "report", "perkebunan", "pabrik"]);
        let Some(Commands::Report(report_args)) = args.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(report_args.datasets, vec!["perkebunan", "pabrik"]);
        assert_eq!(report_args.output_format, OutputFormat::Human);
    }
}
