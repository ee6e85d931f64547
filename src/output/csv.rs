//! CSV output formatter for scan results.
//!
//! # Columns
//!
//! - `path`: record key (relative to the scan root)
//! - `digest`: lowercase hex digest

use std::io;

use serde::Serialize;

use super::OutputError;
use crate::store::ChecksumSet;

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    path: &'a str,
    digest: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    checksums: &'a ChecksumSet,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(checksums: &'a ChecksumSet) -> Self {
        Self { checksums }
    }

    /// Write the CSV output to the given writer.
    ///
    /// A header row is always written, even for an empty set.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), OutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(["path", "digest"])?;
        for (path, digest) in self.checksums {
            csv_writer.serialize(CsvRow { path, digest })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if serialization fails.
    pub fn to_csv_string(&self) -> Result<String, OutputError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
