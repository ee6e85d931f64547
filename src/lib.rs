//! modelsum - Checksums for ML model files
//!
//! Computes SHA-256 (or BLAKE3) digests of model artifacts such as `.h5`,
//! `.pt` and `.onnx` files, verifies files against known digests, scans
//! directory trees for model files, and persists the results as a JSON
//! checksum file.
//!
//! # Example
//!
//! ```no_run
//! use modelsum::{calculate_checksum, save_checksums, scan_directory, verify_checksum};
//! use std::path::Path;
//!
//! let digest = calculate_checksum("resnet50.onnx").unwrap();
//! assert!(verify_checksum("resnet50.onnx", &digest).unwrap());
//!
//! let report = scan_directory("models", None, true).unwrap();
//! save_checksums(&report.checksums, Path::new("checksums.json")).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod store;
pub mod verify;

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;
use yansi::Paint;

use crate::cli::{CalculateArgs, CheckArgs, Cli, Commands, OutputFormat, ScanArgs, VerifyArgs};
use crate::config::Config;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::scanner::path_utils::normalize_path_str;
use crate::scanner::{Hasher, ScanOptions, Scanner, WalkerConfig};
use crate::verify::{check_records, verify_against_records, verify_with, CheckStatus};

// Re-export the library surface
pub use error::{ErrorKind, ExitCode, IntegrityError};
pub use formats::get_supported_formats;
pub use scanner::{calculate_checksum, scan_directory, Algorithm, ScanReport};
pub use store::{load_checksums, save_checksums, ChecksumSet};
pub use verify::verify_checksum;

/// Run the application for parsed CLI arguments, writing results to stdout.
///
/// Logging must already be initialized.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = std::io::stdout();
    if cli.no_color || !stdout.is_terminal() {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    log::debug!("Effective configuration: {:?}", config);

    let mut out = stdout.lock();
    execute(&cli, &config, &mut out)
}

/// Execute a subcommand, writing its results to `out`.
///
/// # Errors
///
/// Returns an error when the command cannot complete. A digest mismatch is
/// not an error; it is reported through [`ExitCode::Mismatch`].
pub fn execute<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Calculate(args) => handle_calculate(args, config, out),
        Commands::Verify(args) => handle_verify(args, config, out),
        Commands::Scan(args) => handle_scan(args, config, !cli.quiet, out),
        Commands::Formats => handle_formats(out),
        Commands::Check(args) => handle_check(args, config, out),
    }
}

fn handle_calculate<W: Write>(
    args: &CalculateArgs,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    let hasher = Hasher::with_algorithm(args.algorithm.unwrap_or(config.algorithm));
    let digest = hasher.hash_file(&args.model)?;
    writeln!(out, "{digest}")?;

    if let Some(ref output) = args.output {
        let mut checksums = ChecksumSet::new();
        checksums.insert(normalize_path_str(&args.model.to_string_lossy()), digest);
        save_checksums(&checksums, output)?;
        log::info!("Checksum saved to {}", output.display());
    }

    Ok(ExitCode::Success)
}

fn handle_verify<W: Write>(
    args: &VerifyArgs,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    let hasher = Hasher::with_algorithm(args.algorithm.unwrap_or(config.algorithm));

    let matched = match (&args.checksum, &args.checksum_file) {
        (Some(expected), _) => verify_with(&hasher, &args.model, expected)?,
        (None, Some(manifest)) => {
            let records = load_checksums(manifest)?;
            verify_against_records(&hasher, &args.model, &records, manifest)?
        }
        (None, None) => anyhow::bail!("Either --checksum or --checksum-file is required"),
    };

    if matched {
        writeln!(out, "{}", "✓ Checksum verified successfully".green())?;
        Ok(ExitCode::Success)
    } else {
        writeln!(out, "{}", "✗ Checksum mismatch!".red())?;
        Ok(ExitCode::Mismatch)
    }
}

fn handle_scan<W: Write>(
    args: &ScanArgs,
    config: &Config,
    show_progress: bool,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    let extensions = match args.formats {
        Some(ref list) => formats::parse_extensions(list),
        None => formats::default_extensions(),
    };

    let mut ignore_patterns = config.ignore_patterns.clone();
    ignore_patterns.extend(args.ignore_patterns.iter().cloned());

    let options = ScanOptions {
        walker: WalkerConfig {
            recursive: !args.no_recursive,
            follow_symlinks: args.follow_symlinks || config.follow_symlinks,
            skip_hidden: args.skip_hidden || config.skip_hidden,
            ignore_patterns,
            extensions,
        },
        algorithm: args.algorithm.unwrap_or(config.algorithm),
        strict: args.strict || config.strict,
    };

    let mut scanner = Scanner::new(options);
    if show_progress && config.progress {
        scanner = scanner.with_progress(Arc::new(Progress::new(false)));
    }

    let report = scanner
        .scan(&args.directory)
        .with_context(|| format!("Scan of {} failed", args.directory.display()))?;

    match args.output_format {
        OutputFormat::Text => TextOutput::new(&report.checksums).write_to(out)?,
        OutputFormat::Json => JsonOutput::new(&report.checksums).write_to(out, true)?,
        OutputFormat::Csv => CsvOutput::new(&report.checksums).write_to(&mut *out)?,
    }

    if report.checksums.is_empty() {
        log::info!("No model files found in {}", args.directory.display());
    }

    if let Some(ref output) = args.output {
        save_checksums(&report.checksums, output)?;
        log::info!(
            "Found {} model file(s). Checksums saved to {}",
            report.checksums.len(),
            output.display()
        );
    }

    if report.is_complete() {
        Ok(ExitCode::Success)
    } else {
        log::warn!(
            "{} file(s) could not be hashed and were left out",
            report.failures.len()
        );
        Ok(ExitCode::PartialSuccess)
    }
}

fn handle_formats<W: Write>(out: &mut W) -> anyhow::Result<ExitCode> {
    for ext in get_supported_formats() {
        writeln!(out, "{ext}")?;
    }
    Ok(ExitCode::Success)
}

fn handle_check<W: Write>(
    args: &CheckArgs,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    let hasher = Hasher::with_algorithm(args.algorithm.unwrap_or(config.algorithm));
    let records = load_checksums(&args.checksum_file)?;

    let root = match args.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    log::debug!(
        "Checking {} record(s) from {} against {}",
        records.len(),
        args.checksum_file.display(),
        root.display()
    );

    let report = check_records(&hasher, &records, &root);
    for entry in &report.entries {
        match entry.status {
            CheckStatus::Ok => writeln!(out, "{}: {}", entry.key, "OK".green())?,
            CheckStatus::Mismatch { .. } => writeln!(out, "{}: {}", entry.key, "FAILED".red())?,
            CheckStatus::Failed(ref error) => {
                writeln!(out, "{}: {} ({})", entry.key, "ERROR".red(), error)?
            }
        }
    }

    log::info!(
        "{} passed, {} mismatched, {} could not be read",
        report.passed(),
        report.mismatched(),
        report.failed()
    );

    if report.all_ok() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::Mismatch)
    }
}
