//! Command-line argument definitions for the IOS processor
//!
//! Defines the CLI interface using the clap derive API. The processor works
//! on records already parsed from native IOS shell format into JSON by the
//! reader tooling, and writes converted records for the container writer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the IOS ocean data processor
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ios-processor",
    version,
    about = "Convert IOS oceanographic instrument records into BODC-coded, CF-compliant variable sets",
    long_about = "Processes Institute of Ocean Sciences instrument records (CTD, current meter, \
                  mooring and bottle files) into standardized variable sets: channel names are \
                  classified into physical quantities, BODC parameter codes and canonical units \
                  are resolved, and declared pad values are normalized to NaN. Output is ready \
                  for serialization into CF-compliant NetCDF containers."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the IOS processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert parsed instrument records (default command)
    Convert(ConvertArgs),
    /// Validate the BODC resolution tables
    Validate(ValidateArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input record file or directory of record files
    ///
    /// Directories are searched recursively for .json record files produced
    /// by the IOS shell-format reader.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: PathBuf,

    /// Output directory for converted records
    ///
    /// Will be created if it doesn't exist. Each input record produces one
    /// converted .json file with the same stem.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Conversion configuration file (institution metadata, JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Number of records converted concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Increase logging verbosity
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
