//! Sawit Monitor Library
//!
//! A Rust library for monitoring palm oil production data published through
//! Google Sheets, fetched as JSON row arrays from an Apps Script proxy.
//!
//! This library provides tools for:
//! - Fetching sheet rows from the proxy endpoint with timeout handling
//! - Inferring column roles (category vs. numeric) from loosely typed rows
//! - Parsing loosely formatted numeric cells (thousands separators,
//!   decimal commas, unit suffixes)
//! - Deriving chart-ready series and zero-substituting aggregate totals
//! - Building per-dataset reports and a cross-dataset overview
//! - Comprehensive error handling with source chaining

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod report;
        pub mod sheet_client;
        pub mod tabular;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ChartPoint, ColumnClassification, Row, SheetTable};
pub use config::Config;

/// Result type alias for sawit-monitor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fetch, decode, and configuration failures
///
/// The tabular core itself never fails: unparseable cells, missing labels,
/// and empty inputs resolve to `None`/omission/zero by contract. These
/// variants cover the shell around it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP request to the sheet proxy failed or returned a non-success status
    #[error("failed to fetch sheet '{sheet}': {message}")]
    SheetFetch {
        sheet: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response body could not be decoded as JSON
    #[error("invalid response for sheet '{sheet}': {message}")]
    SheetDecode {
        sheet: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration file or value error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Dataset name not present in the configured registry
    #[error("unknown dataset: {name}")]
    UnknownDataset { name: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled before completion
    #[error("interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create a sheet fetch error with context
    pub fn sheet_fetch(
        sheet: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::SheetFetch {
            sheet: sheet.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sheet decode error with context
    pub fn sheet_decode(
        sheet: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::SheetDecode {
            sheet: sheet.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown dataset error
    pub fn unknown_dataset(name: impl Into<String>) -> Self {
        Self::UnknownDataset { name: name.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("invalid TOML configuration: {}", error),
        }
    }
}
