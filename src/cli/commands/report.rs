//! Report command implementation
//!
//! Fetches each requested dataset from the sheet proxy, derives its report
//! through the tabular core, and renders the result in the selected output
//! format. One failing dataset is logged and skipped; the command only
//! fails outright when nothing could be fetched at all.

use super::shared::{self, csv_escape, RunStats};
use crate::app::models::{DatasetReport, Row, SheetTable};
use crate::app::services::report::build_dataset_report;
use crate::app::services::sheet_client::SheetClient;
use crate::cli::args::{OutputFormat, ReportArgs};
use crate::config::Config;
use crate::constants::TABLE_CELL_WIDTH;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// One fetched dataset with its derived report
///
/// The derived report stays pure; the raw table rides along for the data
/// table and the machine-readable outputs.
#[derive(Debug, Serialize)]
struct ReportOutput {
    #[serde(flatten)]
    report: DatasetReport,
    rows: Vec<Row>,
}

/// Report command runner
///
/// Workflow:
/// 1. Set up logging and load layered configuration
/// 2. Resolve the requested datasets against the registry
/// 3. Fetch each sheet with progress reporting
/// 4. Derive and render one report per dataset
pub async fn run_report(
    args: ReportArgs,
    cancellation_token: CancellationToken,
) -> Result<RunStats> {
    let start_time = Instant::now();

    shared::setup_logging(args.get_log_level())?;
    info!("Starting dataset report");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = shared::load_configuration(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, &args);
    config.validate()?;

    let datasets = shared::resolve_datasets(&config, &args.datasets)?;
    info!("Reporting on {} datasets", datasets.len());

    let client = SheetClient::new(&config.fetch)?;
    let progress_bar = args
        .show_progress()
        .then(|| shared::create_progress_bar(datasets.len() as u64));

    let mut stats = RunStats::default();
    let mut outputs = Vec::new();
    let mut last_error = None;

    for dataset in &datasets {
        if let Some(progress) = &progress_bar {
            progress.set_message(format!("Fetching {}", dataset.sheet));
        }

        match client
            .fetch_sheet_cancellable(&dataset.sheet, &cancellation_token)
            .await
        {
            Ok(table) => {
                stats.datasets_fetched += 1;
                stats.rows_fetched += table.row_count();
                let report = build_dataset_report(&table, dataset);
                let SheetTable { rows, .. } = table;
                outputs.push(ReportOutput { report, rows });
            }
            Err(interrupt @ Error::Interrupted { .. }) => return Err(interrupt),
            Err(fetch_error) => {
                error!("Failed to fetch dataset {}: {}", dataset.name, fetch_error);
                stats.errors_encountered += 1;
                last_error = Some(fetch_error);
            }
        }

        if let Some(progress) = &progress_bar {
            progress.inc(1);
        }
    }

    if let Some(progress) = &progress_bar {
        progress.finish_and_clear();
    }

    // Nothing fetched at all: surface the underlying failure
    if outputs.is_empty() {
        if let Some(fetch_error) = last_error {
            return Err(fetch_error);
        }
    }

    stats.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => render_human(&outputs, &config, &stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outputs).unwrap()),
        OutputFormat::Csv => render_csv(&outputs),
    }

    info!(
        "Report complete in {}",
        HumanDuration(stats.processing_time)
    );
    Ok(stats)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &ReportArgs) {
    if let Some(endpoint) = &args.endpoint {
        config.fetch.endpoint = endpoint.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.fetch.timeout_secs = timeout_secs;
    }
    if let Some(limit) = args.limit {
        config.output.table_row_limit = limit;
    }
    config.logging.level = args.get_log_level().to_string();
}

/// Render the human-readable report for every dataset
fn render_human(outputs: &[ReportOutput], config: &Config, stats: &RunStats) {
    for output in outputs {
        let report = &output.report;

        println!("\n🌴 {}", report.dataset.title.bright_green().bold());
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if !report.dataset.description.is_empty() {
            println!("   {}", report.dataset.description);
        }

        println!("\n📊 Status Data:");
        println!("   • Baris data: {}", report.row_count);
        println!(
            "   • Pembaruan terakhir: {}",
            report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!(
            "   • Kolom kategori: {}",
            report
                .classification
                .category_key
                .as_deref()
                .unwrap_or("Tidak tersedia")
        );
        println!(
            "   • Kolom utama: {}",
            report
                .primary_value_key
                .as_deref()
                .unwrap_or("Tidak tersedia")
        );

        if !report.totals.is_empty() {
            println!("\n🧮 Total Kolom Numerik:");
            for total in &report.totals {
                println!("   • {}: {}", total.column, format_value(total.total));
            }
        }

        if report.has_chart() {
            let primary = report.primary_value_key.as_deref().unwrap_or("Data");
            println!("\n📈 Tren {}:", primary);
            for point in &report.series {
                println!(
                    "   {:<width$} | {}",
                    clip(&point.label_text(), TABLE_CELL_WIDTH),
                    format_value(point.value),
                    width = TABLE_CELL_WIDTH
                );
            }
        } else {
            println!("\n📈 Tidak ada kolom numerik yang dapat divisualisasikan.");
        }

        render_data_table(output, config.output.table_row_limit);
    }

    println!(
        "\n✅ Selesai: {} dataset, {} baris dalam {}",
        stats.datasets_fetched,
        stats.rows_fetched,
        HumanDuration(stats.processing_time)
    );
    if stats.errors_encountered > 0 {
        println!(
            "⚠️  {}",
            format!("Gagal memuat {} dataset", stats.errors_encountered).yellow()
        );
    }
}

/// Render the trailing data table, bounded by the configured row limit
fn render_data_table(output: &ReportOutput, row_limit: usize) {
    let report = &output.report;

    println!("\n📋 Tabel Data ({} baris):", report.row_count);
    if report.display_columns.is_empty() {
        println!("   Data tidak tersedia.");
        return;
    }

    let header: Vec<String> = report
        .display_columns
        .iter()
        .map(|column| format!("{:<width$}", clip(column, TABLE_CELL_WIDTH), width = TABLE_CELL_WIDTH))
        .collect();
    println!("   {}", header.join(" | "));

    let divider: Vec<String> = report
        .display_columns
        .iter()
        .map(|_| "-".repeat(TABLE_CELL_WIDTH))
        .collect();
    println!("   {}", divider.join("-|-"));

    for row in output.rows.iter().take(row_limit) {
        let cells: Vec<String> = report
            .display_columns
            .iter()
            .map(|column| {
                format!(
                    "{:<width$}",
                    clip(&cell_text(row.get(column)), TABLE_CELL_WIDTH),
                    width = TABLE_CELL_WIDTH
                )
            })
            .collect();
        println!("   {}", cells.join(" | "));
    }

    if report.row_count > row_limit {
        println!(
            "   ... dan {} baris lainnya (atur dengan --limit)",
            report.row_count - row_limit
        );
    }
}

/// Render the chart series of every report as CSV
fn render_csv(outputs: &[ReportOutput]) {
    println!("dataset,label,value");
    for output in outputs {
        for point in &output.report.series {
            println!(
                "{},{},{}",
                csv_escape(&output.report.dataset.name),
                csv_escape(&point.label_text()),
                point.value
            );
        }
    }
}

/// Display form of one table cell: missing and null cells read as "-"
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Clip text to a display width, marking truncation with an ellipsis
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    clipped + "..."
}

/// Format a derived value: integers without decimals, fractions with two
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_renders_missing_as_dash() {
        assert_eq!(cell_text(None), "-");
        assert_eq!(cell_text(Some(&Value::Null)), "-");
        assert_eq!(cell_text(Some(&json!("Jan"))), "Jan");
        assert_eq!(cell_text(Some(&json!(120))), "120");
    }

    #[test]
    fn test_clip_marks_truncation() {
        assert_eq!(clip("pendek", 18), "pendek");
        assert_eq!(
            clip("a".repeat(30).as_str(), 10),
            format!("{}...", "a".repeat(7))
        );
    }

    #[test]
    fn test_format_value_drops_integer_decimals() {
        assert_eq!(format_value(1234.0), "1234");
        assert_eq!(format_value(6.5), "6.50");
        assert_eq!(format_value(-12.345), "-12.35");
    }
}
