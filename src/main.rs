use anyhow::Context;
use clap::Parser;
use ios_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<commands::ConversionSummary> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => {
                result.context("record conversion failed")
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(anyhow::anyhow!("processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("IOS Ocean Data Processor");
    println!();
    println!("Convert IOS oceanographic instrument records into BODC-coded,");
    println!("CF-compliant variable sets ready for NetCDF serialization.");
    println!();
    println!("USAGE:");
    println!("    ios-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert parsed instrument records");
    println!("    validate    Validate the BODC resolution tables");
    println!();
    println!("Run 'ios-processor <COMMAND> --help' for command options.");
}
