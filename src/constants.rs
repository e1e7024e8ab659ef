//! Application constants for sawit-monitor
//!
//! This module contains default values and mappings used throughout the
//! monitoring tool: the production proxy endpoint, the dataset registry
//! defaults, and display limits.

// =============================================================================
// Sheet Proxy Endpoint
// =============================================================================

/// Production Apps Script deployment serving sheet rows as JSON
///
/// Each dataset is requested as `{endpoint}?sheet={name}`. The deployment
/// answers with an array of flat objects, one per spreadsheet row.
pub const DEFAULT_PROXY_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbyZVUuOh3_WWXeLYP5Q9-pBkaFy-DAstfjKuZglh2y6QJHzkGE4_Ro4d_sRKCC69YGw/exec";

/// Request timeout for a single sheet fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// User agent sent with proxy requests
pub const DEFAULT_USER_AGENT: &str = "sawit-monitor/0.3";

// =============================================================================
// Dataset Registry Defaults
// =============================================================================

/// Sheet names of the production datasets
pub const SHEET_PERKEBUNAN: &str = "Perkebunan";
pub const SHEET_PABRIK: &str = "Pabrik";
pub const SHEET_PERUSAHAAN: &str = "Perusahaan";

/// All dataset names known to the default registry
pub const DATASET_NAMES: &[&str] = &["perkebunan", "pabrik", "perusahaan"];

// =============================================================================
// Overview Metric Defaults
// =============================================================================

/// Columns summarized on the overview, as published by the sheets
pub const COLUMN_HASIL_PANEN: &str = "Hasil Panen (ton)";
pub const COLUMN_PRODUKSI_CPO: &str = "Produksi CPO (ton)";
pub const COLUMN_FFA: &str = "FFA (%)";

/// FFA percentage below which CPO quality is considered good
pub const FFA_QUALITY_THRESHOLD: f64 = 3.0;

// =============================================================================
// Display Text
// =============================================================================

/// Heading of the cross-dataset overview report
pub const OVERVIEW_TITLE: &str = "Dashboard Monitoring & Analisis Produksi Sawit";

/// Subtitle of the cross-dataset overview report
pub const OVERVIEW_SUBTITLE: &str =
    "Integrasi data Perkebunan, Pabrik, dan Perusahaan dalam satu tampilan.";

// =============================================================================
// Display Limits
// =============================================================================

/// Default number of data rows printed in the human report table
pub const DEFAULT_TABLE_ROW_LIMIT: usize = 25;

/// Cell width used when laying out the human report table
pub const TABLE_CELL_WIDTH: usize = 18;
