//! Chart series construction and aggregation
//!
//! Projects rows into (label, value) pairs for one category/value column
//! pair, and sums numeric columns across a table. See the module docs for
//! the deliberate omit-vs-zero asymmetry between the two.

use super::parser::parse_number;
use crate::app::models::{ChartPoint, Row};
use serde_json::Value;

/// Project rows into chart points for a category/value column pair
///
/// A row is omitted, silently and by contract, when its label is missing or
/// null, or its value cell does not parse as a number. Output order matches
/// input row order; rows are never reordered or deduplicated.
pub fn build_chart_data(rows: &[Row], category_key: &str, value_key: &str) -> Vec<ChartPoint> {
    rows.iter()
        .filter_map(|row| {
            let label = row.get(category_key).filter(|value| !value.is_null())?;
            let value = parse_number(row.get(value_key).unwrap_or(&Value::Null))?;
            Some(ChartPoint {
                label: label.clone(),
                value,
            })
        })
        .collect()
}

/// Sum the given numeric columns across every row
///
/// An unparseable or missing cell contributes zero; no row is ever dropped.
/// Summaries must not undercount partial rows, which is why this differs
/// from [`build_chart_data`]'s omission policy. An empty key set sums to
/// zero.
pub fn summarize<S: AsRef<str>>(rows: &[Row], keys: &[S]) -> f64 {
    if keys.is_empty() {
        return 0.0;
    }

    rows.iter()
        .map(|row| {
            keys.iter()
                .map(|key| {
                    row.get(key.as_ref())
                        .and_then(parse_number)
                        .unwrap_or(0.0)
                })
                .sum::<f64>()
        })
        .sum()
}
