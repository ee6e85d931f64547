//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Walking a directory tree for model files ([`walker`])
//! - Streaming SHA-256 / BLAKE3 hashing ([`hasher`])
//! - Portable record keys ([`path_utils`])
//!
//! # Error policy
//!
//! A scan fails up front if the root does not exist or is not a directory.
//! After that, a file that cannot be read is skipped and recorded in
//! [`ScanReport::failures`] while the rest of the tree is still hashed.
//! Setting [`ScanOptions::strict`] switches to fail-fast: the first per-file
//! error aborts the scan.
//!
//! Two files whose names differ only in Unicode normalization map to the same
//! key. The first one walked keeps it; the other is reported as an
//! [`IntegrityError::KeyCollision`] failure.
//!
//! # Example
//!
//! ```no_run
//! use modelsum::scanner::scan_directory;
//!
//! let report = scan_directory("/srv/models", None, true).unwrap();
//! for (key, digest) in &report.checksums {
//!     println!("{digest}  {key}");
//! }
//! for failure in &report.failures {
//!     eprintln!("skipped {}: {}", failure.path.display(), failure.error);
//! }
//! ```

pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::IntegrityError;
use crate::formats::default_extensions;
use crate::progress::ProgressCallback;
use crate::store::ChecksumSet;

// Re-export main types
pub use hasher::{calculate_checksum, calculate_checksum_with, Algorithm, Hasher};
pub use walker::Walker;

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Descend into subdirectories.
    pub recursive: bool,

    /// Follow symbolic links during traversal.
    /// When false, symlinks are skipped entirely.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Glob patterns to ignore (gitignore-style), relative to the root.
    pub ignore_patterns: Vec<String>,

    /// Normalized extensions to include (see [`crate::formats`]).
    pub extensions: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_symlinks: false,
            skip_hidden: false,
            ignore_patterns: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

/// Options for a full scan: what to walk, how to hash, how to treat errors.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Traversal settings.
    pub walker: WalkerConfig,
    /// Digest algorithm.
    pub algorithm: Algorithm,
    /// Abort on the first unreadable file instead of skipping it.
    pub strict: bool,
}

/// A file the scanner found but could not hash.
#[derive(Debug)]
pub struct ScanFailure {
    /// Path of the file (or directory) that failed
    pub path: PathBuf,
    /// Why it failed
    pub error: IntegrityError,
}

/// Result of one directory scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Digests keyed by path relative to the scan root
    pub checksums: ChecksumSet,
    /// Files that matched but could not be hashed
    pub failures: Vec<ScanFailure>,
    /// Total bytes hashed
    pub bytes_hashed: u64,
}

impl ScanReport {
    /// Whether every matching file was hashed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Walks a directory and hashes every matching file.
pub struct Scanner {
    options: ScanOptions,
    hasher: Hasher,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("options", &self.options)
            .field("hasher", &self.hasher)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Scanner {
    /// Create a scanner with the given options.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        let hasher = Hasher::with_algorithm(options.algorithm);
        Self {
            options,
            hasher,
            progress: None,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scan `root` and return the digests of all matching files.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::NotFound`] if `root` does not exist
    /// - [`IntegrityError::NotADirectory`] if `root` is not a directory
    /// - [`IntegrityError::NoExtensions`] if the extension filter is empty
    /// - in strict mode, the first per-file error
    pub fn scan(&self, root: &Path) -> Result<ScanReport, IntegrityError> {
        let metadata = std::fs::metadata(root).map_err(|e| IntegrityError::from_read(root, e))?;
        if !metadata.is_dir() {
            return Err(IntegrityError::NotADirectory(root.to_path_buf()));
        }
        if self.options.walker.extensions.is_empty() {
            return Err(IntegrityError::NoExtensions);
        }

        log::debug!(
            "Scanning {} (recursive: {}, extensions: {}, algorithm: {})",
            root.display(),
            self.options.walker.recursive,
            self.options.walker.extensions.join(","),
            self.hasher.algorithm()
        );

        if let Some(ref progress) = self.progress {
            progress.on_scan_start(root);
        }

        let walker = Walker::new(root, self.options.walker.clone());
        let mut report = ScanReport::default();
        let mut visited = 0usize;

        for result in walker.walk() {
            let outcome = result.and_then(|path| self.hash_entry(root, path, &mut report));
            if let Err(error) = outcome {
                if self.options.strict {
                    return Err(error);
                }
                log::warn!("Skipping: {}", error);
                report.failures.push(ScanFailure {
                    path: error
                        .path()
                        .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                    error,
                });
            }

            visited += 1;
            if let Some(ref progress) = self.progress {
                progress.on_file(visited);
            }
        }

        if let Some(ref progress) = self.progress {
            progress.on_scan_end(report.checksums.len());
        }

        log::info!(
            "Hashed {} model file(s) ({}), skipped {}",
            report.checksums.len(),
            bytesize::ByteSize::b(report.bytes_hashed),
            report.failures.len()
        );
        Ok(report)
    }

    /// Hash one walked file and record it in the report.
    fn hash_entry(
        &self,
        root: &Path,
        path: PathBuf,
        report: &mut ScanReport,
    ) -> Result<(), IntegrityError> {
        let key = path_utils::relative_key(root, &path)
            .unwrap_or_else(|| path_utils::normalize_path_str(&path.to_string_lossy()));
        // Names that differ only in Unicode form share one NFC key.
        if report.checksums.contains_key(&key) {
            return Err(IntegrityError::KeyCollision { key, path });
        }

        let digest = self.hasher.hash_file(&path)?;

        report.bytes_hashed += std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        report.checksums.insert(key, digest);
        Ok(())
    }
}

/// Scan a directory with default options.
///
/// `extensions` overrides the registry's formats when given; tokens are
/// normalized the same way as on the command line.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan_directory(
    root: impl AsRef<Path>,
    extensions: Option<&[String]>,
    recursive: bool,
) -> Result<ScanReport, IntegrityError> {
    let extensions = match extensions {
        Some(list) => list
            .iter()
            .filter_map(|ext| crate::formats::normalize_extension(ext))
            .collect(),
        None => default_extensions(),
    };

    let options = ScanOptions {
        walker: WalkerConfig {
            recursive,
            extensions,
            ..Default::default()
        },
        ..Default::default()
    };
    Scanner::new(options).scan(root.as_ref())
}
