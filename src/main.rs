use clap::Parser;
use salesboard::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Without a signal handler the command simply runs to completion
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(salesboard::Error::processing_interrupted("Interrupted by user").into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Salesboard - Sales Performance Export Ingester");
    println!("==============================================");
    println!();
    println!("Reads the semicolon-delimited exports produced by the sales team");
    println!("spreadsheets and reports normalized records, team KPIs and warnings.");
    println!();
    println!("USAGE:");
    println!("    salesboard <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    team        Parse a single team export");
    println!("    ranking     Parse the company-wide leaderboard export");
    println!("    load        Load every configured or discovered team export");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    Configuration file (JSON)");
    println!("        --format <FORMAT>  Output format: text or json");
    println!("    -v, --verbose          Increase logging verbosity");
    println!("    -q, --quiet            Only show errors");
    println!("    -h, --help             Show help information");
    println!("    -V, --version          Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a team export with the attendance layout:");
    println!("    salesboard team EQUIPE_KAWANY.csv --layout attendance");
    println!();
    println!("    # Load every EQUIPE_*.csv in a directory as JSON:");
    println!("    salesboard load --data-dir ./exports --attendance-team KAWANY --format json");
    println!();
    println!("    # Parse the extended leaderboard:");
    println!("    salesboard ranking ranking.csv --extended");
    println!();
    println!("For detailed help on any command, use:");
    println!("    salesboard <COMMAND> --help");
}
