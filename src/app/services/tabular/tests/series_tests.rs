//! Tests for chart series construction and aggregation

use super::rows_from;
use crate::app::services::tabular::{build_chart_data, summarize};
use serde_json::json;

#[test]
fn test_unparseable_value_drops_the_row() {
    let rows = rows_from(json!([
        {"Bulan": "Jan", "Panen": "10"},
        {"Bulan": "Feb", "Panen": "abc"}
    ]));
    let series = build_chart_data(&rows, "Bulan", "Panen");

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, json!("Jan"));
    assert_eq!(series[0].value, 10.0);
}

#[test]
fn test_missing_or_null_label_drops_the_row() {
    let rows = rows_from(json!([
        {"Bulan": null, "Panen": "10"},
        {"Panen": "20"},
        {"Bulan": "Mar", "Panen": "30"}
    ]));
    let series = build_chart_data(&rows, "Bulan", "Panen");

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, json!("Mar"));
}

#[test]
fn test_output_order_matches_input_row_order() {
    let rows = rows_from(json!([
        {"Bulan": "Mar", "Panen": "30"},
        {"Bulan": "Jan", "Panen": "10"},
        {"Bulan": "Feb", "Panen": "abc"},
        {"Bulan": "Apr", "Panen": "40"}
    ]));
    let series = build_chart_data(&rows, "Bulan", "Panen");

    let labels: Vec<String> = series.iter().map(|p| p.label_text()).collect();
    assert_eq!(labels, vec!["Mar", "Jan", "Apr"]);
}

#[test]
fn test_labels_are_kept_verbatim() {
    // Numeric labels stay numbers; no coercion to string
    let rows = rows_from(json!([{"Tahun": 2024, "Panen": "120"}]));
    let series = build_chart_data(&rows, "Tahun", "Panen");

    assert_eq!(series[0].label, json!(2024));
    assert_eq!(series[0].label_text(), "2024");
}

#[test]
fn test_values_are_parsed_not_copied() {
    let rows = rows_from(json!([{"Bulan": "Jan", "Panen": "1,234.5"}]));
    let series = build_chart_data(&rows, "Bulan", "Panen");

    assert_eq!(series[0].value, 1234.5);
}

#[test]
fn test_summarize_substitutes_zero_for_unparseable_cells() {
    let rows = rows_from(json!([{"X": "10"}, {"X": "abc"}]));

    // The bad cell contributes 0; the row count does not shrink
    assert_eq!(summarize(&rows, &["X"]), 10.0);
}

#[test]
fn test_summarize_with_empty_keys_is_zero() {
    let rows = rows_from(json!([{"X": "10"}]));
    let no_keys: &[&str] = &[];

    assert_eq!(summarize(&rows, no_keys), 0.0);
}

#[test]
fn test_summarize_sums_across_rows_and_keys() {
    let rows = rows_from(json!([
        {"X": "10", "Y": "1,5"},
        {"X": 20, "Y": null},
        {"Y": "2.5"}
    ]));

    assert_eq!(summarize(&rows, &["X", "Y"]), 35.5);
}

#[test]
fn test_chart_omits_where_summary_substitutes() {
    // The asymmetry is the contract: charts drop partial rows, summaries
    // zero-fill them
    let rows = rows_from(json!([
        {"Bulan": "Jan", "Panen": "10"},
        {"Bulan": "Feb", "Panen": "abc"}
    ]));

    assert_eq!(build_chart_data(&rows, "Bulan", "Panen").len(), 1);
    assert_eq!(summarize(&rows, &["Panen"]), 10.0);
}

#[test]
fn test_empty_rows_yield_empty_outputs() {
    assert!(build_chart_data(&[], "Bulan", "Panen").is_empty());
    assert_eq!(summarize::<&str>(&[], &["Panen"]), 0.0);
}

#[test]
fn test_series_building_is_idempotent() {
    let rows = rows_from(json!([{"Bulan": "Jan", "Panen": "10"}]));
    assert_eq!(
        build_chart_data(&rows, "Bulan", "Panen"),
        build_chart_data(&rows, "Bulan", "Panen")
    );
}
