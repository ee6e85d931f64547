//! Command-line interface definitions for modelsum.
//!
//! This module defines all CLI arguments and subcommands using the clap derive API.
//! Global options (verbosity, color, config) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Print the SHA-256 of a model
//! modelsum calculate resnet50.onnx
//!
//! # Verify against a literal digest or a checksum file
//! modelsum verify resnet50.onnx -c 9f86d0...
//! modelsum verify resnet50.onnx -f checksums.json
//!
//! # Record every model under a directory, then re-check them later
//! modelsum scan ./models -o checksums.json
//! modelsum check checksums.json --root ./models
//! ```

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scanner::Algorithm;

/// Checksum calculation and verification for ML model files.
///
/// modelsum computes SHA-256 digests of model artifacts (.h5, .pt, .onnx),
/// verifies them against known values, and records them in JSON checksum
/// files to detect tampering or corruption.
#[derive(Debug, Parser)]
#[command(name = "modelsum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for modelsum.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Calculate the checksum of a model file
    Calculate(CalculateArgs),
    /// Verify a model file against an expected checksum
    Verify(VerifyArgs),
    /// Scan a directory for model files and checksum each one
    Scan(ScanArgs),
    /// List the supported model file extensions
    Formats,
    /// Verify every entry of a checksum file
    Check(CheckArgs),
}

/// Arguments for the calculate subcommand.
#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// Path to the model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Also save the checksum to this JSON file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Digest algorithm (defaults to the configured one, sha256)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
}

/// Arguments for the verify subcommand.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("expected")
        .required(true)
        .args(["checksum", "checksum_file"])
))]
pub struct VerifyArgs {
    /// Path to the model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Expected checksum value
    #[arg(short = 'c', long, value_name = "DIGEST")]
    pub checksum: Option<String>,

    /// JSON checksum file to look the model up in
    #[arg(short = 'f', long, value_name = "FILE")]
    pub checksum_file: Option<PathBuf>,

    /// Digest algorithm (defaults to the configured one, sha256)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Comma-separated list of extensions to include (e.g., .h5,.pt)
    #[arg(short = 'f', long, value_name = "EXTS")]
    pub formats: Option<String>,

    /// Don't scan subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Save the checksums to this JSON file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How to print the records on stdout
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Glob patterns to ignore (can be specified multiple times)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Follow symbolic links during scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Stop at the first unreadable file instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Digest algorithm (defaults to the configured one, sha256)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
}

/// Arguments for the check subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON checksum file to verify
    #[arg(value_name = "FILE")]
    pub checksum_file: PathBuf,

    /// Directory relative keys are resolved against (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Digest algorithm (defaults to the configured one, sha256)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<digest>  <path>` lines
    Text,
    /// JSON object of path to digest
    Json,
    /// CSV with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
