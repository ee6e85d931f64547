//! Path key normalization.
//!
//! Scan results are keyed by the file's path relative to the scan root. To
//! make those keys portable between machines they are:
//!
//! - joined with `/` regardless of platform
//! - normalized to Unicode NFC, so a file created on macOS (NFD) and the
//!   same name on Linux (NFC) produce the same key
//!
//! # Example
//!
//! ```
//! use modelsum::scanner::path_utils::{normalize_key, relative_key};
//! use std::path::Path;
//!
//! let key = relative_key(Path::new("/models"), Path::new("/models/vision/resnet.onnx"));
//! assert_eq!(key.as_deref(), Some("vision/resnet.onnx"));
//!
//! assert_eq!(normalize_key("./vision\\resnet.onnx"), "vision/resnet.onnx");
//! ```

use std::path::{Component, Path};
use unicode_normalization::UnicodeNormalization;

/// Normalize a path string to NFC (Composed) form.
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Build the record key for `path` relative to `root`.
///
/// Returns `None` if `path` is not inside `root`.
#[must_use]
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(normalize_path_str(&parts.join("/")))
}

/// Normalize a user-supplied key for lookup in a record set.
///
/// Backslashes become `/`, `.` segments and repeated separators are dropped,
/// and the result is NFC-normalized. A leading `/` is preserved so absolute
/// keys stay absolute.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let unified = key.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    let normalized = normalize_path_str(&joined);
    if absolute {
        format!("/{normalized}")
    } else {
        normalized
    }
}
