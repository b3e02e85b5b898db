use clap::Parser;
use opta_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Opta Feed Processor - Soccer Match Data Converter");
    println!("=================================================");
    println!();
    println!("Convert nested Opta (Stats Perform) match feeds into flat Parquet");
    println!("tables for fast Python data analysis.");
    println!();
    println!("USAGE:");
    println!("    opta-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Ingest match payloads into the accumulation store (main command)");
    println!("    status      Report the accumulated tables and matches");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest every payload in a directory:");
    println!("    opta-processor ingest payloads/");
    println!();
    println!("    # Ingest into a custom store with zstd compression:");
    println!("    opta-processor ingest payloads/ --output data/match-events --compression zstd");
    println!();
    println!("    # Show per-table and per-match status:");
    println!("    opta-processor status --detailed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    opta-processor <COMMAND> --help");
}
