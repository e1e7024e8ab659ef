use clap::Parser;
use sawit_monitor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the selected command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token coordinates graceful shutdown of in-flight fetches
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(sawit_monitor::Error::interrupted(
                    "cancelled by user".to_string(),
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - output has already been rendered by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sawit Monitor - Palm Oil Production Dashboard");
    println!("=============================================");
    println!();
    println!("Monitor palm oil production data published through Google Sheets:");
    println!("fetch datasets from the configured proxy, classify their columns,");
    println!("and render chart series, totals, and data tables in the terminal.");
    println!();
    println!("USAGE:");
    println!("    sawit-monitor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    report      Render detailed reports for one or more datasets");
    println!("    overview    Render the cross-dataset overview with metric means");
    println!("    datasets    List the configured dataset registry");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Report on every configured dataset:");
    println!("    sawit-monitor report");
    println!();
    println!("    # Report on one dataset as JSON:");
    println!("    sawit-monitor report perkebunan --output-format json");
    println!();
    println!("    # Cross-dataset overview with the quality insight:");
    println!("    sawit-monitor overview");
    println!();
    println!("    # List dataset names accepted by the report command:");
    println!("    sawit-monitor datasets");
    println!();
    println!("For detailed help on any command, use:");
    println!("    sawit-monitor <COMMAND> --help");
}
