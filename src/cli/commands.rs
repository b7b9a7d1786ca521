//! CLI command implementations
//!
//! Thin driver around the conversion engine: discovers record files, runs
//! conversions with bounded concurrency, and reports a summary. Each record
//! is converted end-to-end by one blocking task; records share no mutable
//! state, so failures stay isolated to their file.

use crate::app::models::RawRecord;
use crate::app::services::code_resolver::table;
use crate::app::services::record_converter::RecordConverter;
use crate::cli::args::{Args, Commands, ConvertArgs, ValidateArgs};
use crate::config::ConversionConfig;
use crate::constants::{DEFAULT_OUTPUT_DIR, RECORD_FILE_EXTENSION};
use crate::{Error, Result};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Summary of a batch conversion, reported after the run
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    /// Number of records converted successfully
    pub records_converted: usize,
    /// Number of records that failed
    pub records_failed: usize,
    /// Total variables emitted across all records
    pub variables_emitted: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Run the selected command
pub async fn run(args: Args) -> Result<ConversionSummary> {
    match args.command {
        Some(Commands::Convert(convert_args)) => convert(convert_args).await,
        Some(Commands::Validate(validate_args)) => validate(validate_args),
        None => {
            // Handled by main with a help screen; nothing to do here
            Ok(ConversionSummary::default())
        }
    }
}

/// Set up structured logging from the CLI verbosity level
///
/// `RUST_LOG` overrides the flag when set.
pub fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ios_processor={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Validate the resolution tables and report their size
fn validate(args: ValidateArgs) -> Result<ConversionSummary> {
    setup_logging(args.verbose);

    table::validate()?;

    let kinds = table::TABLE.len();
    let rules: usize = table::TABLE.iter().map(|(_, rules)| rules.len()).sum();
    println!(
        "{} {} quantity kinds, {} resolution rules",
        "Resolution tables valid:".green().bold(),
        kinds,
        rules
    );

    Ok(ConversionSummary::default())
}

/// Convert one file or a directory of record files
async fn convert(args: ConvertArgs) -> Result<ConversionSummary> {
    setup_logging(args.verbose);
    let started = Instant::now();

    // Table defects are build bugs; surface them before touching any data
    table::validate()?;

    let config = match &args.config_path {
        Some(path) => ConversionConfig::from_file(path)?,
        None => ConversionConfig::default(),
    };

    let input_files = discover_record_files(&args.input_path)?;
    if input_files.is_empty() {
        return Err(Error::configuration(format!(
            "no .{} record files found under '{}'",
            RECORD_FILE_EXTENSION,
            args.input_path.display()
        )));
    }

    let output_dir = args
        .output_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| Error::io(format!("failed to create '{}'", output_dir.display()), e))?;

    let workers = args.workers.unwrap_or_else(num_cpus::get).max(1);
    info!(
        "Converting {} record(s) with {} worker(s)",
        input_files.len(),
        workers
    );

    let progress = ProgressBar::new(input_files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .expect("valid progress template")
        .progress_chars("#>-"),
    );

    let converter = Arc::new(RecordConverter::new(config));

    let results: Vec<(PathBuf, Result<usize>)> = stream::iter(input_files)
        .map(|path| {
            let converter = Arc::clone(&converter);
            let output_dir = output_dir.clone();
            let progress = progress.clone();
            async move {
                let result = tokio::task::spawn_blocking(move || {
                    convert_one(&converter, &path, &output_dir).map(|n| (path, n))
                })
                .await
                .expect("conversion task panicked");
                progress.inc(1);
                match result {
                    Ok((path, n)) => (path, Ok(n)),
                    Err((path, e)) => (path, Err(e)),
                }
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    progress.finish_and_clear();

    let mut summary = ConversionSummary {
        processing_time: started.elapsed(),
        ..Default::default()
    };
    for (path, result) in &results {
        match result {
            Ok(n) => {
                summary.records_converted += 1;
                summary.variables_emitted += n;
            }
            Err(e) => {
                summary.records_failed += 1;
                warn!("{}: {}", path.display(), e);
            }
        }
    }

    print_summary(&summary, &output_dir);

    Ok(summary)
}

/// Convert one record file, writing the converted record next to its stem
fn convert_one(
    converter: &RecordConverter,
    path: &Path,
    output_dir: &Path,
) -> std::result::Result<usize, (PathBuf, Error)> {
    let run = || -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read '{}'", path.display()), e))?;
        let record: RawRecord = serde_json::from_str(&content).map_err(|e| {
            Error::json(path.display().to_string(), "failed to parse record", Some(e))
        })?;

        let converted = converter.convert(&record)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("record");
        let output_path = output_dir.join(format!("{}.nc.{}", stem, RECORD_FILE_EXTENSION));
        let serialized = serde_json::to_string_pretty(&converted)?;
        std::fs::write(&output_path, serialized)
            .map_err(|e| Error::io(format!("failed to write '{}'", output_path.display()), e))?;

        info!(
            "Wrote {} ({} variables)",
            output_path.display(),
            converted.variables.len()
        );
        Ok(converted.variables.len())
    };

    run().map_err(|e| (path.to_path_buf(), e))
}

/// Record files under the input path, sorted for deterministic ordering
fn discover_record_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(RECORD_FILE_EXTENSION))
        })
        .collect();

    files.sort();
    Ok(files)
}

fn print_summary(summary: &ConversionSummary, output_dir: &Path) {
    println!();
    println!("{}", "Conversion complete".green().bold());
    println!(
        "  {} {}",
        "Records converted:".bold(),
        summary.records_converted
    );
    if summary.records_failed > 0 {
        println!(
            "  {} {}",
            "Records failed:".bold().red(),
            summary.records_failed
        );
    }
    println!(
        "  {} {}",
        "Variables emitted:".bold(),
        summary.variables_emitted
    );
    println!("  {} {:.2?}", "Elapsed:".bold(), summary.processing_time);
    println!("  {} {}", "Output:".bold(), output_dir.display());
}
