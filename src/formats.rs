//! Registry of recognized model-file extensions.
//!
//! Extensions are stored with their leading period (`.pt`). Matching is
//! case-insensitive: `MODEL.PT` counts as a `.pt` file.

use std::path::Path;

/// Model-file extensions recognized by default, in display order.
pub const SUPPORTED_FORMATS: [&str; 3] = [".h5", ".pt", ".onnx"];

/// Return the supported extensions in a fixed order.
///
/// # Example
///
/// ```
/// use modelsum::formats::get_supported_formats;
///
/// assert_eq!(get_supported_formats(), vec![".h5", ".pt", ".onnx"]);
/// ```
#[must_use]
pub fn get_supported_formats() -> Vec<&'static str> {
    SUPPORTED_FORMATS.to_vec()
}

/// The supported extensions as owned strings, ready for a scan filter.
#[must_use]
pub fn default_extensions() -> Vec<String> {
    SUPPORTED_FORMATS.iter().map(|s| (*s).to_string()).collect()
}

/// Normalize a single user-supplied extension token.
///
/// Trims whitespace, adds the leading period if it is missing, and
/// lowercases. Returns `None` for tokens with nothing left after the period.
///
/// ```
/// use modelsum::formats::normalize_extension;
///
/// assert_eq!(normalize_extension(" PT ").as_deref(), Some(".pt"));
/// assert_eq!(normalize_extension(".onnx").as_deref(), Some(".onnx"));
/// assert_eq!(normalize_extension("."), None);
/// ```
#[must_use]
pub fn normalize_extension(token: &str) -> Option<String> {
    let trimmed = token.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

/// Parse a comma-separated extension list such as `".h5, pt,.ONNX"`.
///
/// Empty tokens are dropped and duplicates removed; first-seen order is kept.
#[must_use]
pub fn parse_extensions(list: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for ext in list.split(',').filter_map(normalize_extension) {
        if !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }
    extensions
}

/// Check whether a path's file name ends with one of `extensions`.
///
/// `extensions` must already be normalized (see [`normalize_extension`]).
/// A file whose entire name is the extension (e.g. `.pt`) is not a match.
#[must_use]
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();

    extensions
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
}
