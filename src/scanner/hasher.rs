//! Streaming file hasher.
//!
//! # Overview
//!
//! [`Hasher`] reads a file in fixed-size chunks and feeds them into a
//! 256-bit digest, SHA-256 by default or BLAKE3 on request. The result is
//! always rendered as 64 lowercase hexadecimal characters.
//!
//! Memory use is bounded by the chunk buffer regardless of file size, and the
//! digest does not depend on the chunk size.
//!
//! # Example
//!
//! ```no_run
//! use modelsum::scanner::hasher::{Algorithm, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("model.pt")).unwrap();
//! assert_eq!(digest.len(), 64);
//!
//! let blake = Hasher::with_algorithm(Algorithm::Blake3);
//! let digest = blake.hash_file(Path::new("model.pt")).unwrap();
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::IntegrityError;

/// Default read buffer size (64 KiB).
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Length of a hex-encoded 256-bit digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Supported digest algorithms.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// SHA-256 (default)
    #[default]
    Sha256,
    /// BLAKE3 with 256-bit output
    Blake3,
}

impl Algorithm {
    /// Lowercase algorithm name as used on the command line and in config.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Incremental digest state for one file.
enum DigestState {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sha256 => Self::Sha256(Sha256::new()),
            Algorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha256(state) => state.update(chunk),
            Self::Blake3(state) => {
                state.update(chunk);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Sha256(state) => format!("{:x}", state.finalize()),
            Self::Blake3(state) => state.finalize().to_hex().to_string(),
        }
    }
}

/// File hasher with a configurable algorithm and read buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    algorithm: Algorithm,
    buffer_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a SHA-256 hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_algorithm(Algorithm::default())
    }

    /// Create a hasher for the given algorithm.
    #[must_use]
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Override the read buffer size. Zero is treated as one byte.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// The algorithm this hasher uses.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute the hex digest of a file's entire content.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::NotFound`] if the path does not exist
    /// - [`IntegrityError::NotAFile`] if the path is a directory
    /// - [`IntegrityError::Unreadable`] on permission or other I/O errors
    pub fn hash_file(&self, path: &Path) -> Result<String, IntegrityError> {
        let file = File::open(path).map_err(|e| IntegrityError::from_read(path, e))?;

        let metadata = file
            .metadata()
            .map_err(|e| IntegrityError::from_read(path, e))?;
        if metadata.is_dir() {
            return Err(IntegrityError::NotAFile(path.to_path_buf()));
        }

        let digest = self
            .hash_reader(file)
            .map_err(|e| IntegrityError::from_read(path, e))?;

        log::trace!("{} {}: {}", self.algorithm, path.display(), digest);
        Ok(digest)
    }

    /// Compute the hex digest of everything a reader yields.
    ///
    /// # Errors
    ///
    /// Returns the first non-`Interrupted` I/O error from the reader.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<String> {
        let mut state = DigestState::new(self.algorithm);
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
        }

        Ok(state.finalize_hex())
    }

    /// Compute the hex digest of an in-memory byte slice.
    #[must_use]
    pub fn hash_bytes(&self, data: &[u8]) -> String {
        let mut state = DigestState::new(self.algorithm);
        state.update(data);
        state.finalize_hex()
    }
}

/// Compute the SHA-256 digest of a file as 64 lowercase hex characters.
///
/// # Errors
///
/// See [`Hasher::hash_file`].
pub fn calculate_checksum(path: impl AsRef<Path>) -> Result<String, IntegrityError> {
    Hasher::new().hash_file(path.as_ref())
}

/// Compute a file digest with an explicit algorithm.
///
/// # Errors
///
/// See [`Hasher::hash_file`].
pub fn calculate_checksum_with(
    path: impl AsRef<Path>,
    algorithm: Algorithm,
) -> Result<String, IntegrityError> {
    Hasher::with_algorithm(algorithm).hash_file(path.as_ref())
}

/// Whether `s` has the shape of a digest produced by this module.
#[must_use]
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
