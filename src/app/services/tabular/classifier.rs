//! Column role inference
//!
//! Sheets publish no schema, so column roles are inferred from the data:
//! columns whose values parse as numbers become chart series candidates,
//! and the first non-numeric column becomes the label axis.

use super::parser::parse_number;
use crate::app::models::{ColumnClassification, Row};

/// Partition the columns of a row set into category and numeric keys
///
/// Only the first row is inspected; later rows are assumed
/// column-compatible. This single-sample heuristic is part of the contract:
/// downstream callers depend on its exact fallback behavior, so it must
/// not be "improved" into a full scan.
///
/// Rules:
/// - Empty input yields no category key and no numeric keys.
/// - `numeric_keys` are the first row's keys whose values parse as numbers,
///   preserving the row's key order.
/// - `category_key` is the first key that is not numeric, falling back to
///   the first key when every column is numeric.
pub fn detect_columns(rows: &[Row]) -> ColumnClassification {
    let Some(first) = rows.first() else {
        return ColumnClassification::default();
    };

    let numeric_keys: Vec<String> = first
        .iter()
        .filter(|(_, value)| parse_number(value).is_some())
        .map(|(key, _)| key.clone())
        .collect();

    let category_key = first
        .keys()
        .find(|key| !numeric_keys.iter().any(|numeric| numeric == *key))
        .or_else(|| first.keys().next())
        .cloned();

    ColumnClassification {
        category_key,
        numeric_keys,
    }
}
