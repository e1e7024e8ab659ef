//! Report derivation from fetched tables
//!
//! One parameterized pipeline serves every dataset: classification, primary
//! indicator selection, chart series, per-column totals, and display column
//! ordering all derive from the fetched rows plus the dataset's registry
//! entry. The cross-dataset overview reuses the same core to compute metric
//! means and the configured threshold insight.

use crate::app::models::{
    ColumnTotal, DatasetReport, Insight, MetricSummary, OverviewReport, Row, SheetTable,
};
use crate::app::services::tabular::{build_chart_data, detect_columns, summarize};
use crate::config::{DatasetConfig, OverviewConfig};
use chrono::Utc;
use std::collections::HashMap;

/// Derive the full report for one dataset
///
/// The primary value key is the first numeric column; the chart series is
/// derived over (category, primary) when both exist, and is empty
/// otherwise. Totals cover every numeric column in key order.
pub fn build_dataset_report(table: &SheetTable, dataset: &DatasetConfig) -> DatasetReport {
    let classification = detect_columns(&table.rows);
    let primary_value_key = classification.numeric_keys.first().cloned();

    let series = match (&classification.category_key, &primary_value_key) {
        (Some(category), Some(value)) => build_chart_data(&table.rows, category, value),
        _ => Vec::new(),
    };

    let totals = classification
        .numeric_keys
        .iter()
        .map(|key| ColumnTotal {
            column: key.clone(),
            total: summarize(&table.rows, std::slice::from_ref(key)),
        })
        .collect();

    let display_columns = display_columns(&table.rows, classification.category_key.as_deref());

    DatasetReport {
        dataset: dataset.clone(),
        fetched_at: table.fetched_at,
        row_count: table.row_count(),
        classification,
        primary_value_key,
        series,
        totals,
        display_columns,
    }
}

/// Column order for the data table: category key first, remaining first-row
/// keys after it in their original order
fn display_columns(rows: &[Row], category_key: Option<&str>) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let keys = first.keys().cloned();

    match category_key {
        Some(category) => std::iter::once(category.to_string())
            .chain(keys.filter(|key| key != category))
            .collect(),
        None => keys.collect(),
    }
}

/// Assemble the cross-dataset overview from fetched tables
///
/// `tables` is keyed by dataset registry name. A metric whose dataset is
/// missing or empty reports a zero mean over zero rows; the renderer shows
/// those as unavailable rather than as a zero measurement. Means are
/// zero-substituting: an unparseable cell lowers the mean but never shrinks
/// the denominator.
pub fn build_overview(
    tables: &HashMap<String, SheetTable>,
    config: &OverviewConfig,
) -> OverviewReport {
    let metrics: Vec<MetricSummary> = config
        .metrics
        .iter()
        .map(|metric| {
            let (mean, row_count) = match tables.get(&metric.dataset) {
                Some(table) if !table.is_empty() => {
                    let total = summarize(&table.rows, std::slice::from_ref(&metric.column));
                    (total / table.row_count() as f64, table.row_count())
                }
                _ => (0.0, 0),
            };
            MetricSummary {
                label: metric.label.clone(),
                unit: metric.unit.clone(),
                mean,
                row_count,
            }
        })
        .collect();

    let insight = config.insight.as_ref().and_then(|rule| {
        let metric = metrics
            .iter()
            .find(|m| m.label == rule.metric_label && m.has_data())?;
        let below_threshold = metric.mean < rule.threshold;
        let message = if below_threshold {
            rule.below_message.clone()
        } else {
            rule.above_message.clone()
        };
        Some(Insight {
            message,
            below_threshold,
        })
    });

    OverviewReport {
        generated_at: Utc::now(),
        metrics,
        insight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, InsightConfig, MetricConfig};
    use serde_json::json;

    fn table(sheet: &str, rows: serde_json::Value) -> SheetTable {
        let rows = rows
            .as_array()
            .expect("fixture must be a JSON array")
            .iter()
            .map(|entry| entry.as_object().expect("fixture entries must be objects").clone())
            .collect();
        SheetTable::new(sheet, rows)
    }

    fn perkebunan_config() -> DatasetConfig {
        Config::default().dataset("perkebunan").unwrap().clone()
    }

    #[test]
    fn test_primary_value_key_is_first_numeric_column() {
        let table = table(
            "Perkebunan",
            json!([{"Bulan": "Jan", "Panen": "120", "Luas": "4,5"}]),
        );
        let report = build_dataset_report(&table, &perkebunan_config());

        assert_eq!(report.primary_value_key.as_deref(), Some("Panen"));
        assert!(report.has_chart());
    }

    #[test]
    fn test_series_covers_category_and_primary_pair() {
        let table = table(
            "Perkebunan",
            json!([
                {"Bulan": "Jan", "Panen": "120"},
                {"Bulan": "Feb", "Panen": "rusak"},
                {"Bulan": "Mar", "Panen": "95"}
            ]),
        );
        let report = build_dataset_report(&table, &perkebunan_config());

        let labels: Vec<String> = report.series.iter().map(|p| p.label_text()).collect();
        assert_eq!(labels, vec!["Jan", "Mar"]);
        assert_eq!(report.row_count, 3);
    }

    #[test]
    fn test_totals_cover_every_numeric_column_in_order() {
        let table = table(
            "Perkebunan",
            json!([
                {"Bulan": "Jan", "Panen": "120", "Luas": "4,5"},
                {"Bulan": "Feb", "Panen": "80", "Luas": "x"}
            ]),
        );
        let report = build_dataset_report(&table, &perkebunan_config());

        assert_eq!(report.totals.len(), 2);
        assert_eq!(report.totals[0], ColumnTotal { column: "Panen".to_string(), total: 200.0 });
        assert_eq!(report.totals[1], ColumnTotal { column: "Luas".to_string(), total: 4.5 });
    }

    #[test]
    fn test_display_columns_put_category_first() {
        let table = table(
            "Perkebunan",
            json!([{"Panen": "120", "Bulan": "Jan", "Luas": "4,5"}]),
        );
        let report = build_dataset_report(&table, &perkebunan_config());

        assert_eq!(report.display_columns, vec!["Bulan", "Panen", "Luas"]);
    }

    #[test]
    fn test_empty_table_builds_an_empty_report() {
        let table = SheetTable::new("Perkebunan", Vec::new());
        let report = build_dataset_report(&table, &perkebunan_config());

        assert_eq!(report.row_count, 0);
        assert_eq!(report.primary_value_key, None);
        assert!(report.series.is_empty());
        assert!(report.totals.is_empty());
        assert!(report.display_columns.is_empty());
        assert!(!report.has_chart());
    }

    #[test]
    fn test_overview_mean_is_zero_substituting() {
        let mut tables = HashMap::new();
        tables.insert(
            "perkebunan".to_string(),
            table(
                "Perkebunan",
                json!([
                    {"Bulan": "Jan", "Hasil Panen (ton)": "100"},
                    {"Bulan": "Feb", "Hasil Panen (ton)": "kosong"}
                ]),
            ),
        );

        let config = OverviewConfig {
            metrics: vec![MetricConfig {
                dataset: "perkebunan".to_string(),
                column: "Hasil Panen (ton)".to_string(),
                label: "Rata-rata Hasil Panen".to_string(),
                unit: "ton".to_string(),
            }],
            insight: None,
        };
        let overview = build_overview(&tables, &config);

        // The unparseable cell contributes 0 but stays in the denominator
        assert_eq!(overview.metrics[0].mean, 50.0);
        assert_eq!(overview.metrics[0].row_count, 2);
    }

    #[test]
    fn test_overview_metric_without_data_reports_zero_rows() {
        let tables = HashMap::new();
        let config = OverviewConfig {
            metrics: vec![MetricConfig {
                dataset: "perkebunan".to_string(),
                column: "Hasil Panen (ton)".to_string(),
                label: "Rata-rata Hasil Panen".to_string(),
                unit: "ton".to_string(),
            }],
            insight: None,
        };
        let overview = build_overview(&tables, &config);

        assert!(!overview.metrics[0].has_data());
        assert_eq!(overview.metrics[0].mean, 0.0);
    }

    #[test]
    fn test_insight_selects_message_by_threshold() {
        let insight_rule = InsightConfig {
            metric_label: "Rata-rata FFA".to_string(),
            threshold: 3.0,
            below_message: "baik".to_string(),
            above_message: "perlu perhatian".to_string(),
        };
        let config = OverviewConfig {
            metrics: vec![MetricConfig {
                dataset: "perusahaan".to_string(),
                column: "FFA (%)".to_string(),
                label: "Rata-rata FFA".to_string(),
                unit: "%".to_string(),
            }],
            insight: Some(insight_rule),
        };

        let mut tables = HashMap::new();
        tables.insert(
            "perusahaan".to_string(),
            table("Perusahaan", json!([{"Bulan": "Jan", "FFA (%)": "2.1"}])),
        );
        let overview = build_overview(&tables, &config);
        let insight = overview.insight.expect("insight should fire with data");
        assert!(insight.below_threshold);
        assert_eq!(insight.message, "baik");

        tables.insert(
            "perusahaan".to_string(),
            table("Perusahaan", json!([{"Bulan": "Jan", "FFA (%)": "4.8"}])),
        );
        let overview = build_overview(&tables, &config);
        let insight = overview.insight.expect("insight should fire with data");
        assert!(!insight.below_threshold);
        assert_eq!(insight.message, "perlu perhatian");
    }

    #[test]
    fn test_insight_is_absent_without_backing_data() {
        let config = OverviewConfig {
            metrics: vec![MetricConfig {
                dataset: "perusahaan".to_string(),
                column: "FFA (%)".to_string(),
                label: "Rata-rata FFA".to_string(),
                unit: "%".to_string(),
            }],
            insight: Some(InsightConfig {
                metric_label: "Rata-rata FFA".to_string(),
                threshold: 3.0,
                below_message: "baik".to_string(),
                above_message: "perlu perhatian".to_string(),
            }),
        };

        let overview = build_overview(&HashMap::new(), &config);
        assert!(overview.insight.is_none());
    }
}
