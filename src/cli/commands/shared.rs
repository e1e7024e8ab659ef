//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress bar construction,
//! and the run statistics every command returns.

use crate::config::{Config, DatasetConfig};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Statistics reported by a command run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of datasets fetched successfully
    pub datasets_fetched: usize,
    /// Total rows fetched across all datasets
    pub rows_fetched: usize,
    /// Number of fetch failures that were skipped over
    pub errors_encountered: usize,
    /// Total command time
    pub processing_time: std::time::Duration,
}

/// Set up structured logging to stderr at the given level
///
/// `RUST_LOG` takes precedence over the CLI-derived level when set.
pub fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sawit_monitor={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file)
///
/// An explicit `--config` path must exist; the default location is used
/// only when a file is actually there.
pub fn load_configuration(config_file: Option<&Path>) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    if let Some(path) = config_file {
        info!("Using config file: {}", path.display());
    } else {
        info!("No config file found, using built-in defaults");
    }

    Config::load_layered(config_file)
}

/// Resolve requested dataset names against the registry
///
/// An empty request selects every configured dataset in registry order;
/// otherwise each name must exist.
pub fn resolve_datasets(config: &Config, requested: &[String]) -> Result<Vec<DatasetConfig>> {
    if requested.is_empty() {
        return Ok(config.datasets.clone());
    }
    requested
        .iter()
        .map(|name| config.dataset(name).cloned())
        .collect()
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Create the standard fetch progress bar
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(len);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress_bar
}
