//! JSON persistence of checksum records.
//!
//! A checksum file is a flat JSON object mapping path keys to digest
//! strings:
//!
//! ```json
//! {
//!   "resnet.onnx": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!   "vision/vit.pt": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! }
//! ```
//!
//! There is no version field and no nesting. Loading checks the structure
//! only; digest values are kept as opaque strings.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::IntegrityError;

/// Mapping from path key to digest. Sorted, so saved files are stable.
pub type ChecksumSet = BTreeMap<String, String>;

/// Write `checksums` to `path` as pretty-printed JSON.
///
/// An existing file is overwritten. Parent directories are not created.
///
/// # Errors
///
/// Returns [`IntegrityError::WriteFailure`] if the file cannot be created or
/// written.
pub fn save_checksums(checksums: &ChecksumSet, path: &Path) -> Result<(), IntegrityError> {
    let write_failure = |source| IntegrityError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(checksums)
        .map_err(|e| write_failure(std::io::Error::other(e)))?;

    let file = File::create(path).map_err(write_failure)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes()).map_err(write_failure)?;
    writer.write_all(b"\n").map_err(write_failure)?;
    writer.flush().map_err(write_failure)?;

    log::debug!("Saved {} checksum(s) to {}", checksums.len(), path.display());
    Ok(())
}

/// Read a checksum file written by [`save_checksums`] (or by hand).
///
/// # Errors
///
/// - [`IntegrityError::NotFound`] if the file does not exist
/// - [`IntegrityError::Unreadable`] on other I/O errors
/// - [`IntegrityError::Malformed`] if the content is not a JSON object whose
///   values are all strings
pub fn load_checksums(path: &Path) -> Result<ChecksumSet, IntegrityError> {
    let bytes = fs::read(path).map_err(|e| IntegrityError::from_read(path, e))?;
    let checksums = parse_checksums(&bytes).map_err(|reason| IntegrityError::Malformed {
        path: path.to_path_buf(),
        reason,
    })?;

    log::debug!(
        "Loaded {} checksum(s) from {}",
        checksums.len(),
        path.display()
    );
    Ok(checksums)
}

/// Parse checksum JSON, describing the first structural problem on failure.
fn parse_checksums(bytes: &[u8]) -> Result<ChecksumSet, String> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    let Value::Object(map) = value else {
        return Err(format!("expected a JSON object, found {}", value_kind(&value)));
    };

    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(digest) => Ok((key, digest)),
            other => Err(format!(
                "value for '{key}' must be a string, found {}",
                value_kind(&other)
            )),
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
