//! Datasets command implementation
//!
//! Lists the configured dataset registry without touching the network.
//! Useful for discovering the names the `report` command accepts.

use super::shared::{self, RunStats};
use crate::cli::args::{DatasetsArgs, OutputFormat};
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Datasets command runner
pub fn run_datasets(args: DatasetsArgs) -> Result<RunStats> {
    shared::setup_logging("warn")?;
    info!("Listing configured datasets");

    let config = shared::load_configuration(args.config_file.as_deref())?;
    config.validate()?;

    match args.output_format {
        OutputFormat::Human => {
            println!("\n📚 {}", "Dataset Terdaftar".bright_green().bold());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for dataset in &config.datasets {
                println!(
                    "\n   {} (sheet: {})",
                    dataset.name.bright_white().bold(),
                    dataset.sheet
                );
                println!("   {}", dataset.title);
                if !dataset.description.is_empty() {
                    println!("   {}", dataset.description);
                }
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.datasets).unwrap())
        }
        OutputFormat::Csv => {
            println!("name,sheet,title");
            for dataset in &config.datasets {
                println!(
                    "{},{},{}",
                    shared::csv_escape(&dataset.name),
                    shared::csv_escape(&dataset.sheet),
                    shared::csv_escape(&dataset.title)
                );
            }
        }
    }

    Ok(RunStats::default())
}
