//! Typed errors, exit codes, and structured error reporting.
//!
//! Library operations return [`IntegrityError`]. The application layer wraps
//! these in `anyhow` context, and `main` turns the result into an
//! [`ExitCode`] plus either a plain `[MSxxx] Error: ...` line or a
//! [`StructuredError`] JSON document on stderr.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Coarse classification of an [`IntegrityError`].
///
/// This is what the CLI reports alongside the message, so scripts can
/// tell "file missing" apart from "checksum file corrupted" without
/// parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// A path or directory does not exist.
    NotFound,
    /// Permission or I/O failure while reading.
    Unreadable,
    /// The checksum JSON is not a flat string-to-string object.
    Malformed,
    /// The output JSON could not be written.
    WriteFailure,
    /// The request itself was unusable (e.g. an empty extension list).
    InvalidInput,
}

impl ErrorKind {
    /// Stable, machine-readable name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::Unreadable => "unreadable",
            Self::Malformed => "malformed",
            Self::WriteFailure => "write-failure",
            Self::InvalidInput => "invalid-input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by checksum calculation, verification, scanning, and the
/// checksum store.
#[derive(thiserror::Error, Debug)]
pub enum IntegrityError {
    /// The file or directory does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// A scan root exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A path that must be hashed is a directory or other non-file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Permission or I/O failure while reading a file.
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        /// Path being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A checksum file is not a JSON object of string values.
    #[error("Malformed checksum file {path}: {reason}")]
    Malformed {
        /// Checksum file that failed to parse
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A checksum file could not be written.
    #[error("Cannot write {path}: {source}")]
    WriteFailure {
        /// Destination path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A checksum file has no entry for the requested path.
    #[error("No checksum for '{key}' in {manifest}")]
    MissingRecord {
        /// Key that was looked up
        key: String,
        /// Checksum file that was searched
        manifest: PathBuf,
    },

    /// Two files normalize to the same record key.
    #[error("Key '{key}' is already taken by another file; skipping {path}")]
    KeyCollision {
        /// The shared record key
        key: String,
        /// The file that was left out
        path: PathBuf,
    },

    /// The extension filter ended up empty.
    #[error("No file extensions to match")]
    NoExtensions,
}

impl IntegrityError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_read(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Unreadable {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The [`ErrorKind`] this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::NotADirectory(_) | Self::MissingRecord { .. } => {
                ErrorKind::NotFound
            }
            Self::NotAFile(_) | Self::Unreadable { .. } => ErrorKind::Unreadable,
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::KeyCollision { .. } | Self::NoExtensions => ErrorKind::InvalidInput,
        }
    }

    /// The offending path, if the error is about one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound(path) | Self::NotADirectory(path) | Self::NotAFile(path) => Some(path),
            Self::Unreadable { path, .. }
            | Self::Malformed { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::KeyCollision { path, .. } => Some(path),
            Self::MissingRecord { manifest, .. } => Some(manifest),
            Self::NoExtensions => None,
        }
    }
}

/// Exit codes for the modelsum binary.
///
/// - 0: Success (checksums computed or verified)
/// - 1: Verification failed (digest mismatch)
/// - 2: Error (file missing, unreadable, malformed input, ...)
/// - 3: Partial success (scan completed but skipped some files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the command completed and every check passed.
    Success = 0,
    /// Mismatch: at least one digest did not match its expected value.
    Mismatch = 1,
    /// General error: the command could not complete.
    GeneralError = 2,
    /// Partial success: a scan completed with some files skipped.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "MS000",
            Self::Mismatch => "MS001",
            Self::GeneralError => "MS002",
            Self::PartialSuccess => "MS003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "MS002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Error kind, when the failure came from a typed [`IntegrityError`]
    pub kind: Option<ErrorKind>,
    /// Offending path, when known
    pub path: Option<String>,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        let integrity = find_integrity_error(err);
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            kind: integrity.map(IntegrityError::kind),
            path: integrity
                .and_then(IntegrityError::path)
                .map(|p| p.display().to_string()),
            message: format!("{err:#}"),
        }
    }
}

/// Find the first [`IntegrityError`] in an error's cause chain.
#[must_use]
pub fn find_integrity_error(err: &anyhow::Error) -> Option<&IntegrityError> {
    err.chain().find_map(|cause| cause.downcast_ref::<IntegrityError>())
}
