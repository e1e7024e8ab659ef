//! Data models for sheet monitoring
//!
//! This module contains the data structures flowing through the tool: raw
//! sheet rows as decoded from the proxy, the column classification produced
//! by the tabular core, and the derived report shapes rendered by the CLI.

use crate::config::DatasetConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Raw Sheet Data
// =============================================================================

/// One flat record from a sheet, keyed by column name
///
/// The map preserves the JSON document's key insertion order (serde_json's
/// `preserve_order` feature); column classification depends on that order.
/// Cell values are JSON scalars: string, number, or null. Rows are treated
/// as immutable inputs and never mutated by the core.
pub type Row = serde_json::Map<String, Value>;

/// Result of fetching one sheet from the proxy
///
/// Owned by the caller and passed into the pure derivation functions; the
/// core holds no fetched state of its own.
#[derive(Debug, Clone, Serialize)]
pub struct SheetTable {
    /// Sheet name as requested from the proxy
    pub sheet: String,

    /// Decoded rows, in document order
    pub rows: Vec<Row>,

    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl SheetTable {
    /// Create a table stamped with the current time
    pub fn new(sheet: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            sheet: sheet.into(),
            rows,
            fetched_at: Utc::now(),
        }
    }

    /// Number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Tabular Core Outputs
// =============================================================================

/// Column roles inferred from the first row of a table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnClassification {
    /// First non-numeric column, used as the chart label axis; falls back
    /// to the first column when every column is numeric, and is absent for
    /// empty input
    pub category_key: Option<String>,

    /// Columns whose first-row value parses as a number, in key order
    pub numeric_keys: Vec<String>,
}

impl ColumnClassification {
    /// Check whether a chart can be derived (category and at least one
    /// numeric column present)
    pub fn is_plottable(&self) -> bool {
        self.category_key.is_some() && !self.numeric_keys.is_empty()
    }
}

/// One (label, value) pair derived from a row for plotting
///
/// The label is the category cell verbatim, not coerced to a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: Value,
    pub value: f64,
}

impl ChartPoint {
    /// Label rendered for display: strings verbatim, other scalars via
    /// their JSON form
    pub fn label_text(&self) -> String {
        match &self.label {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Derived Reports
// =============================================================================

/// Aggregate total of one numeric column across a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotal {
    pub column: String,
    pub total: f64,
}

/// Everything the report renderer needs for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    /// Registry entry the report was built for
    pub dataset: DatasetConfig,

    /// When the underlying rows were fetched
    pub fetched_at: DateTime<Utc>,

    /// Number of rows fetched
    pub row_count: usize,

    /// Column roles inferred from the first row
    pub classification: ColumnClassification,

    /// First numeric column, used as the primary chart indicator
    pub primary_value_key: Option<String>,

    /// Chart series over (category, primary value), rows omitted where
    /// label or value is absent
    pub series: Vec<ChartPoint>,

    /// Zero-substituting totals, one per numeric column in key order
    pub totals: Vec<ColumnTotal>,

    /// Column order for the data table: category key first, remaining
    /// first-row keys after it
    pub display_columns: Vec<String>,
}

impl DatasetReport {
    /// Check whether a chart section should be rendered
    pub fn has_chart(&self) -> bool {
        self.primary_value_key.is_some() && !self.series.is_empty()
    }
}

/// Mean of one configured metric column across its dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Display label from the metric configuration
    pub label: String,

    /// Display unit from the metric configuration
    pub unit: String,

    /// Zero-substituting mean over all rows; 0 when the table is empty
    pub mean: f64,

    /// Number of rows the mean was taken over
    pub row_count: usize,
}

impl MetricSummary {
    /// Check whether any data backed this metric
    pub fn has_data(&self) -> bool {
        self.row_count > 0
    }
}

/// Outcome of the configured threshold rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// Message selected by the threshold comparison
    pub message: String,

    /// True when the metric mean was below the threshold
    pub below_threshold: bool,
}

/// Cross-dataset overview: metric summaries plus the optional insight
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    /// When the overview was assembled
    pub generated_at: DateTime<Utc>,

    /// Metric summaries, in configured order
    pub metrics: Vec<MetricSummary>,

    /// Threshold insight, when configured and backed by data
    pub insight: Option<Insight>,
}
