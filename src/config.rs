//! Configuration management and validation.
//!
//! Provides the layered configuration for the monitoring tool: compiled-in
//! defaults carrying the production dataset registry, an optional TOML file,
//! and CLI overrides applied by the command layer. Every section uses serde
//! defaults so a partial config file only overrides what it names.

use crate::constants::{
    COLUMN_FFA, COLUMN_HASIL_PANEN, COLUMN_PRODUKSI_CPO, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_PROXY_ENDPOINT, DEFAULT_TABLE_ROW_LIMIT, DEFAULT_USER_AGENT, FFA_QUALITY_THRESHOLD,
    SHEET_PABRIK, SHEET_PERKEBUNAN, SHEET_PERUSAHAAN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sheet proxy fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Apps Script proxy URL serving sheet rows as JSON
    pub endpoint: String,

    /// Request timeout for a single sheet fetch, in seconds
    pub timeout_secs: u64,

    /// User agent sent with proxy requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROXY_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Report rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of data rows printed in the human report table
    pub table_row_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_row_limit: DEFAULT_TABLE_ROW_LIMIT,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no CLI verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// One registered dataset: a sheet plus its display metadata
///
/// The registry replaces the per-page duplication of the original dashboard:
/// every dataset is rendered by the same report pipeline, parameterized by
/// this entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Registry name used on the command line (e.g. "perkebunan")
    pub name: String,

    /// Sheet name requested from the proxy (e.g. "Perkebunan")
    pub sheet: String,

    /// Display title for report headers
    pub title: String,

    /// Display description for report headers
    #[serde(default)]
    pub description: String,
}

/// One overview statistic: the mean of a column in one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Registry name of the dataset the column lives in
    pub dataset: String,

    /// Column name exactly as published by the sheet
    pub column: String,

    /// Display label for the metric
    pub label: String,

    /// Display unit appended to the value
    #[serde(default)]
    pub unit: String,
}

/// Threshold rule evaluated against one overview metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Label of the metric the rule applies to
    pub metric_label: String,

    /// Boundary value; means strictly below it select `below_message`
    pub threshold: f64,

    /// Message shown when the metric mean is below the threshold
    pub below_message: String,

    /// Message shown otherwise
    pub above_message: String,
}

/// Cross-dataset overview settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Metrics summarized on the overview, in display order
    pub metrics: Vec<MetricConfig>,

    /// Optional quality insight rule
    pub insight: Option<InsightConfig>,
}

/// Global configuration for the monitoring tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sheet proxy fetch settings
    pub fetch: FetchConfig,

    /// Report rendering settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Registered datasets, in display order
    pub datasets: Vec<DatasetConfig>,

    /// Cross-dataset overview settings
    pub overview: OverviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        let datasets = vec![
            DatasetConfig {
                name: "perkebunan".to_string(),
                sheet: SHEET_PERKEBUNAN.to_string(),
                title: "Monitoring Perkebunan".to_string(),
                description: "Memantau perkembangan produksi kebun, pemanenan, dan indikator \
                              lapangan untuk memastikan suplai TBS ke pabrik tetap terjaga."
                    .to_string(),
            },
            DatasetConfig {
                name: "pabrik".to_string(),
                sheet: SHEET_PABRIK.to_string(),
                title: "Monitoring Pabrik".to_string(),
                description: "Mengawasi kapasitas olah, rendemen, dan utilisasi mesin pabrik \
                              kelapa sawit untuk menjaga efisiensi produksi."
                    .to_string(),
            },
            DatasetConfig {
                name: "perusahaan".to_string(),
                sheet: SHEET_PERUSAHAAN.to_string(),
                title: "Monitoring Perusahaan".to_string(),
                description: "Melihat kinerja keseluruhan perusahaan, mulai dari keuangan, \
                              distribusi, hingga pencapaian strategis lainnya."
                    .to_string(),
            },
        ];

        let metrics = vec![
            MetricConfig {
                dataset: "perkebunan".to_string(),
                column: COLUMN_HASIL_PANEN.to_string(),
                label: "Rata-rata Hasil Panen".to_string(),
                unit: "ton".to_string(),
            },
            MetricConfig {
                dataset: "perusahaan".to_string(),
                column: COLUMN_PRODUKSI_CPO.to_string(),
                label: "Rata-rata Produksi CPO".to_string(),
                unit: "ton".to_string(),
            },
            MetricConfig {
                dataset: "perusahaan".to_string(),
                column: COLUMN_FFA.to_string(),
                label: "Rata-rata FFA".to_string(),
                unit: "%".to_string(),
            },
        ];

        let insight = Some(InsightConfig {
            metric_label: "Rata-rata FFA".to_string(),
            threshold: FFA_QUALITY_THRESHOLD,
            below_message: "Kualitas CPO tergolong baik dengan FFA di bawah ambang batas. \
                            Produksi stabil dan efisien."
                .to_string(),
            above_message: "Perlu perhatian pada kualitas CPO. Nilai FFA di atas normal bisa \
                            mempengaruhi hasil akhir."
                .to_string(),
        });

        Self {
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
            datasets,
            overview: OverviewConfig { metrics, insight },
        }
    }
}

impl Config {
    /// Default config file location (~/.config/sawit-monitor/config.toml)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("could not determine user config directory"))?;
        Ok(config_dir.join("sawit-monitor").join("config.toml"))
    }

    /// Load configuration: defaults, then the TOML file if one is given
    ///
    /// Sections absent from the file keep their default values; the dataset
    /// registry and overview metrics are replaced wholesale when the file
    /// defines them.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    Error::io(format!("failed to read config file '{}'", path.display()), e)
                })?;
                toml::from_str(&contents)?
            }
            None => {
                debug!("No config file, using built-in defaults");
                Self::default()
            }
        };
        Ok(config)
    }

    /// Look up a dataset by registry name (case-insensitive)
    pub fn dataset(&self, name: &str) -> Result<&DatasetConfig> {
        self.datasets
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::unknown_dataset(name))
    }

    /// Registry names of all configured datasets, in display order
    pub fn dataset_names(&self) -> Vec<String> {
        self.datasets.iter().map(|d| d.name.clone()).collect()
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.fetch.endpoint.trim().is_empty() {
            return Err(Error::configuration("fetch endpoint cannot be empty"));
        }
        if !self.fetch.endpoint.starts_with("http://") && !self.fetch.endpoint.starts_with("https://")
        {
            return Err(Error::configuration(format!(
                "fetch endpoint must be an http(s) URL, got '{}'",
                self.fetch.endpoint
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::configuration("fetch timeout must be at least 1 second"));
        }
        if self.output.table_row_limit == 0 {
            return Err(Error::configuration("table row limit must be at least 1"));
        }
        if self.datasets.is_empty() {
            return Err(Error::configuration("at least one dataset must be configured"));
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.name.trim().is_empty() {
                return Err(Error::configuration("dataset name cannot be empty"));
            }
            if dataset.sheet.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "dataset '{}' has an empty sheet name",
                    dataset.name
                )));
            }
            if !seen.insert(dataset.name.to_ascii_lowercase()) {
                return Err(Error::configuration(format!(
                    "duplicate dataset name '{}'",
                    dataset.name
                )));
            }
        }

        for metric in &self.overview.metrics {
            if self.dataset(&metric.dataset).is_err() {
                return Err(Error::configuration(format!(
                    "overview metric '{}' references unknown dataset '{}'",
                    metric.label, metric.dataset
                )));
            }
        }

        if let Some(insight) = &self.overview.insight {
            let known = self
                .overview
                .metrics
                .iter()
                .any(|m| m.label == insight.metric_label);
            if !known {
                return Err(Error::configuration(format!(
                    "insight references unknown metric '{}'",
                    insight.metric_label
                )));
            }
        }

        Ok(())
    }

    /// Create configuration with a custom endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.fetch.endpoint = endpoint.into();
        self
    }

    /// Create configuration with a custom fetch timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.fetch.timeout_secs = timeout_secs;
        self
    }

    /// Create configuration with a custom table row limit
    pub fn with_table_row_limit(mut self, limit: usize) -> Self {
        self.output.table_row_limit = limit;
        self
    }
}
