//! Checksum verification.
//!
//! Verification recomputes a file's digest and compares it with an expected
//! value. Both sides are trimmed and lowercased before the comparison, so
//! `ABC...` and `abc...` are the same digest. The comparison is plain string
//! equality; nothing secret is being compared.
//!
//! A wrong digest yields `Ok(false)`. A file that cannot be hashed yields an
//! error, so callers can tell "verification failed" from "could not verify".

use std::path::{Path, PathBuf};

use crate::error::IntegrityError;
use crate::scanner::hasher::{is_hex_digest, Hasher};
use crate::scanner::path_utils::normalize_key;
use crate::store::ChecksumSet;

/// Canonical form of a digest for comparison.
#[must_use]
pub fn normalize_digest(digest: &str) -> String {
    digest.trim().to_ascii_lowercase()
}

/// Verify a file against an expected SHA-256 digest.
///
/// # Errors
///
/// Propagates [`IntegrityError::NotFound`] and [`IntegrityError::Unreadable`]
/// from hashing.
pub fn verify_checksum(path: impl AsRef<Path>, expected: &str) -> Result<bool, IntegrityError> {
    verify_with(&Hasher::new(), path.as_ref(), expected)
}

/// Verify a file against an expected digest using `hasher`.
///
/// # Errors
///
/// See [`verify_checksum`].
pub fn verify_with(hasher: &Hasher, path: &Path, expected: &str) -> Result<bool, IntegrityError> {
    let expected = normalize_digest(expected);
    if !is_hex_digest(&expected) {
        log::debug!(
            "Expected value for {} is not a {}-style digest: {:?}",
            path.display(),
            hasher.algorithm(),
            expected
        );
    }

    let actual = hasher.hash_file(path)?;
    let matched = actual == expected;
    log::debug!(
        "Verify {}: expected {}, actual {} -> {}",
        path.display(),
        expected,
        actual,
        if matched { "match" } else { "mismatch" }
    );
    Ok(matched)
}

/// Find the stored digest for `key`.
///
/// Tries the key exactly as given first, then its normalized form (see
/// [`normalize_key`]), so `./model.pt` finds an entry saved as `model.pt`.
#[must_use]
pub fn lookup_record<'a>(records: &'a ChecksumSet, key: &str) -> Option<&'a str> {
    if let Some(digest) = records.get(key) {
        return Some(digest.as_str());
    }

    let normalized = normalize_key(key);
    records
        .iter()
        .find(|(stored, _)| normalize_key(stored) == normalized)
        .map(|(_, digest)| digest.as_str())
}

/// Verify `path` against its entry in a loaded checksum file.
///
/// The lookup key is the path as the user wrote it.
///
/// # Errors
///
/// - [`IntegrityError::MissingRecord`] if the file has no entry for `path`
/// - hashing errors as in [`verify_checksum`]
pub fn verify_against_records(
    hasher: &Hasher,
    path: &Path,
    records: &ChecksumSet,
    manifest: &Path,
) -> Result<bool, IntegrityError> {
    let key = path.to_string_lossy();
    let expected = lookup_record(records, &key).ok_or_else(|| IntegrityError::MissingRecord {
        key: key.to_string(),
        manifest: manifest.to_path_buf(),
    })?;
    verify_with(hasher, path, expected)
}

/// Outcome of checking a single record.
#[derive(Debug)]
pub enum CheckStatus {
    /// Digest matched.
    Ok,
    /// Digest differed; holds the freshly computed value.
    Mismatch {
        /// Digest computed from the file on disk
        actual: String,
    },
    /// The file could not be hashed.
    Failed(IntegrityError),
}

/// One line of a [`CheckReport`].
#[derive(Debug)]
pub struct CheckEntry {
    /// Key as stored in the checksum file
    pub key: String,
    /// Path the key resolved to
    pub path: PathBuf,
    /// What happened
    pub status: CheckStatus,
}

/// Results of checking every record in a checksum file.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// One entry per record, in key order
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    /// Number of records that matched.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Number of records whose digest differed.
    #[must_use]
    pub fn mismatched(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Mismatch { .. }))
    }

    /// Number of records that could not be hashed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    /// Whether every record matched.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.passed() == self.entries.len()
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.status)).count()
    }
}

/// Resolve a stored key to a filesystem path.
///
/// Absolute keys are used as-is; relative keys are joined onto `root`.
#[must_use]
pub fn resolve_key(root: &Path, key: &str) -> PathBuf {
    let key_path = Path::new(key);
    if key_path.is_absolute() {
        key_path.to_path_buf()
    } else {
        root.join(key_path)
    }
}

/// Verify every record in `records`, never stopping early.
#[must_use]
pub fn check_records(hasher: &Hasher, records: &ChecksumSet, root: &Path) -> CheckReport {
    let entries = records
        .iter()
        .map(|(key, expected)| {
            let path = resolve_key(root, key);
            let status = match hasher.hash_file(&path) {
                Ok(actual) if actual == normalize_digest(expected) => CheckStatus::Ok,
                Ok(actual) => CheckStatus::Mismatch { actual },
                Err(error) => CheckStatus::Failed(error),
            };
            CheckEntry {
                key: key.clone(),
                path,
                status,
            }
        })
        .collect();

    CheckReport { entries }
}
