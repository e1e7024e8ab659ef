//! Tests for the tabular inference and aggregation module
//!
//! Covers the numeric parser, the single-sample column classifier, and the
//! series/aggregation pair, including the deliberate omit-vs-zero asymmetry.

pub mod series_tests;

// Test helper functions and fixtures
use crate::app::models::Row;
use serde_json::Value;

/// Convert a `json!` array of objects into rows, preserving key order
pub fn rows_from(value: Value) -> Vec<Row> {
    value
        .as_array()
        .expect("fixture must be a JSON array")
        .iter()
        .map(|entry| {
            entry
                .as_object()
                .expect("fixture entries must be JSON objects")
                .clone()
        })
        .collect()
}
