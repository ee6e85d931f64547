//! Plain-text output, one `<digest>  <path>` line per record.
//!
//! The two-space separator matches `sha256sum`, so for SHA-256 scans the
//! output can be fed to `sha256sum -c` from the scan root.

use std::io::Write;

use super::OutputError;
use crate::store::ChecksumSet;

/// Text output formatter.
pub struct TextOutput<'a> {
    checksums: &'a ChecksumSet,
}

impl<'a> TextOutput<'a> {
    /// Create a new text output formatter.
    #[must_use]
    pub fn new(checksums: &'a ChecksumSet) -> Self {
        Self { checksums }
    }

    /// Write every record to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Io` if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), OutputError> {
        for (path, digest) in self.checksums {
            writeln!(writer, "{digest}  {path}")?;
        }
        Ok(())
    }
}
