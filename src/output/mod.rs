//! Output formatters for scan results.
//!
//! This module renders a [`ChecksumSet`](crate::store::ChecksumSet) in
//! different formats:
//! - text, one `<digest>  <path>` line per record (sha256sum style)
//! - JSON for automation and scripting (same shape as the checksum file)
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use modelsum::output::TextOutput;
//! use modelsum::scanner::scan_directory;
//!
//! let report = scan_directory("/srv/models", None, true).unwrap();
//! TextOutput::new(&report.checksums)
//!     .write_to(&mut std::io::stdout())
//!     .unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::io;

use thiserror::Error;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::text::TextOutput;

/// Errors that can occur while rendering output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}
