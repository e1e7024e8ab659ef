//! Integration tests for the tabular core through the public API
//!
//! These tests exercise the full derivation pipeline the way the CLI uses
//! it: classify the columns of a realistic dataset, pick the primary
//! indicator, build the chart series, and aggregate totals.

use sawit_monitor::app::models::Row;
use sawit_monitor::app::services::tabular::{
    build_chart_data, detect_columns, parse_number, summarize,
};
use serde_json::{json, Value};

fn rows_from(value: Value) -> Vec<Row> {
    value
        .as_array()
        .expect("fixture must be a JSON array")
        .iter()
        .map(|entry| {
            entry
                .as_object()
                .expect("fixture entries must be objects")
                .clone()
        })
        .collect()
}

/// A production-shaped harvest dataset: one category column, two numeric
/// columns, loosely formatted cells, one partial row
fn harvest_rows() -> Vec<Row> {
    rows_from(json!([
        {"Bulan": "Jan", "Hasil Panen (ton)": "1,250", "Luas Panen (ha)": "310,5"},
        {"Bulan": "Feb", "Hasil Panen (ton)": "980", "Luas Panen (ha)": "295"},
        {"Bulan": "Mar", "Hasil Panen (ton)": "belum masuk", "Luas Panen (ha)": "300"},
        {"Bulan": "Apr", "Hasil Panen (ton)": 1105, "Luas Panen (ha)": null}
    ]))
}

/// Purpose: validate the classify -> series -> aggregate flow end to end
/// Benefit: guards the exact contract the report builder depends on
#[test]
fn test_full_derivation_pipeline() {
    let rows = harvest_rows();

    let classification = detect_columns(&rows);
    assert_eq!(classification.category_key.as_deref(), Some("Bulan"));
    assert_eq!(
        classification.numeric_keys,
        vec!["Hasil Panen (ton)", "Luas Panen (ha)"]
    );

    let primary = classification.numeric_keys[0].clone();
    let series = build_chart_data(&rows, "Bulan", &primary);

    // March is omitted from the chart (unparseable), April is kept
    let labels: Vec<String> = series.iter().map(|p| p.label_text()).collect();
    assert_eq!(labels, vec!["Jan", "Feb", "Apr"]);
    assert_eq!(series[0].value, 1250.0);

    // The total keeps March in the denominator as a zero contribution
    let total = summarize(&rows, &[primary]);
    assert_eq!(total, 1250.0 + 980.0 + 1105.0);
}

/// Purpose: confirm the omit-vs-zero asymmetry survives the public API
/// Benefit: downstream summaries must never undercount partial rows
#[test]
fn test_series_omits_where_summary_zero_fills() {
    let rows = harvest_rows();

    let area_series = build_chart_data(&rows, "Bulan", "Luas Panen (ha)");
    assert_eq!(area_series.len(), 3); // April's null area is dropped

    let area_total = summarize(&rows, &["Luas Panen (ha)"]);
    assert_eq!(area_total, 310.5 + 295.0 + 300.0); // April contributes 0
}

/// Purpose: spot-check the documented parser behaviors at the crate surface
/// Benefit: these exact cases are what production sheets contain
#[test]
fn test_parser_handles_production_formats() {
    assert_eq!(parse_number(&json!("1,234.5")), Some(1234.5));
    assert_eq!(parse_number(&json!("6,5")), Some(6.5));
    assert_eq!(parse_number(&json!("-12.3kg")), Some(-12.3));
    assert_eq!(parse_number(&json!("abc")), None);
    assert_eq!(parse_number(&Value::Null), None);
}

/// Purpose: verify statelessness across repeated invocations
/// Benefit: callers may derive concurrently from the same row collection
#[test]
fn test_repeated_derivation_is_identical() {
    let rows = harvest_rows();

    assert_eq!(detect_columns(&rows), detect_columns(&rows));
    assert_eq!(
        build_chart_data(&rows, "Bulan", "Hasil Panen (ton)"),
        build_chart_data(&rows, "Bulan", "Hasil Panen (ton)")
    );
    assert_eq!(
        summarize(&rows, &["Hasil Panen (ton)"]),
        summarize(&rows, &["Hasil Panen (ton)"])
    );
}

/// Purpose: empty datasets flow through every stage without failure
/// Benefit: a freshly created sheet must render as "no data", not an error
#[test]
fn test_empty_dataset_derives_empty_outputs() {
    let rows: Vec<Row> = Vec::new();

    let classification = detect_columns(&rows);
    assert_eq!(classification.category_key, None);
    assert!(classification.numeric_keys.is_empty());

    assert!(build_chart_data(&rows, "Bulan", "Panen").is_empty());
    assert_eq!(summarize(&rows, &["Panen"]), 0.0);
}
