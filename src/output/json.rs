//! JSON output formatter for scan results.
//!
//! # Output Schema
//!
//! The same flat object the checksum store writes, so stdout can be
//! redirected straight into a checksum file:
//!
//! ```json
//! {
//!   "resnet.onnx": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
//! }
//! ```

use std::io::Write;

use super::OutputError;
use crate::store::ChecksumSet;

/// JSON output formatter.
#[derive(Debug, Clone, Copy)]
pub struct JsonOutput<'a> {
    checksums: &'a ChecksumSet,
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output.
    #[must_use]
    pub fn new(checksums: &'a ChecksumSet) -> Self {
        Self { checksums }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.checksums)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.checksums)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), OutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
