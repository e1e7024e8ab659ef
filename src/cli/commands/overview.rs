//! Overview command implementation
//!
//! Fetches every configured dataset concurrently and renders the
//! cross-dataset overview: one mean per configured metric plus the
//! threshold insight. A dataset that fails to fetch leaves its metrics
//! without data; the overview still renders.

use super::shared::{self, RunStats};
use crate::app::models::{OverviewReport, SheetTable};
use crate::app::services::report::build_overview;
use crate::app::services::sheet_client::SheetClient;
use crate::cli::args::{OutputFormat, OverviewArgs};
use crate::config::Config;
use crate::constants::{OVERVIEW_SUBTITLE, OVERVIEW_TITLE};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::collections::HashMap;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Overview command runner
///
/// Workflow:
/// 1. Set up logging and load layered configuration
/// 2. Fetch all registered datasets concurrently with progress reporting
/// 3. Build metric means and the insight through the tabular core
/// 4. Render in the selected output format
pub async fn run_overview(
    args: OverviewArgs,
    cancellation_token: CancellationToken,
) -> Result<RunStats> {
    let start_time = Instant::now();

    shared::setup_logging(args.get_log_level())?;
    info!("Starting overview");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = shared::load_configuration(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, &args);
    config.validate()?;

    let client = SheetClient::new(&config.fetch)?;
    let progress_bar = args
        .show_progress()
        .then(|| shared::create_progress_bar(config.datasets.len() as u64));

    info!("Fetching {} datasets concurrently", config.datasets.len());

    let fetches = config.datasets.iter().map(|dataset| {
        let client = &client;
        let cancellation_token = &cancellation_token;
        let progress_bar = progress_bar.as_ref();
        async move {
            let result = client
                .fetch_sheet_cancellable(&dataset.sheet, cancellation_token)
                .await;
            if let Some(progress) = progress_bar {
                progress.inc(1);
            }
            (dataset.name.clone(), result)
        }
    });
    let results = futures::future::join_all(fetches).await;

    if let Some(progress) = &progress_bar {
        progress.finish_and_clear();
    }

    let mut stats = RunStats::default();
    let mut tables: HashMap<String, SheetTable> = HashMap::new();

    for (name, result) in results {
        match result {
            Ok(table) => {
                stats.datasets_fetched += 1;
                stats.rows_fetched += table.row_count();
                tables.insert(name, table);
            }
            Err(interrupt @ Error::Interrupted { .. }) => return Err(interrupt),
            Err(fetch_error) => {
                warn!("Failed to fetch dataset {}: {}", name, fetch_error);
                stats.errors_encountered += 1;
            }
        }
    }

    let overview = build_overview(&tables, &config.overview);
    stats.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => render_human(&overview, &stats),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview).unwrap()),
        OutputFormat::Csv => render_csv(&overview),
    }

    info!(
        "Overview complete in {}",
        HumanDuration(stats.processing_time)
    );
    Ok(stats)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &OverviewArgs) {
    if let Some(endpoint) = &args.endpoint {
        config.fetch.endpoint = endpoint.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.fetch.timeout_secs = timeout_secs;
    }
    config.logging.level = args.get_log_level().to_string();
}

/// Render the human-readable overview
fn render_human(overview: &OverviewReport, stats: &RunStats) {
    println!("\n🌴 {}", OVERVIEW_TITLE.bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   {}", OVERVIEW_SUBTITLE);

    println!("\n📊 Ringkasan Metrik:");
    for metric in &overview.metrics {
        if metric.has_data() {
            println!(
                "   • {}: {} {} ({} baris)",
                metric.label,
                format!("{:.2}", metric.mean).bright_white().bold(),
                metric.unit,
                metric.row_count
            );
        } else {
            println!("   • {}: --", metric.label);
        }
    }

    if let Some(insight) = &overview.insight {
        println!("\n🧠 Insight Otomatis:");
        let message = if insight.below_threshold {
            insight.message.green()
        } else {
            insight.message.yellow()
        };
        println!("   {}", message);
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

/// Render the overview metrics as CSV
fn render_csv(overview: &OverviewReport) {
    println!("label,mean,unit,row_count");
    for metric in &overview.metrics {
        println!(
            "{},{},{},{}",
            shared::csv_escape(&metric.label),
            metric.mean,
            shared::csv_escape(&metric.unit),
            metric.row_count
        );
    }
}
