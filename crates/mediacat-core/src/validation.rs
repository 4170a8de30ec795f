//! Input validation and normalization for uploads.

use crate::constants::{DEFAULT_COLLECTION, MAX_COLLECTION_NAME_LENGTH, OCTET_STREAM};
use crate::error::AppError;

const MAX_FILENAME_LENGTH: usize = 255;

/// Resolve the collection an upload goes into.
///
/// Absent or blank names fall back to [`DEFAULT_COLLECTION`]. Anything else must be
/// 1-255 characters of ASCII letters, digits, `-`, `_` or `.`.
pub fn normalize_collection_name(collection: Option<&str>) -> Result<String, AppError> {
    let name = match collection.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_COLLECTION.to_string()),
        Some(name) => name,
    };

    if name.len() > MAX_COLLECTION_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Collection name must be at most {} characters",
            MAX_COLLECTION_NAME_LENGTH
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(AppError::InvalidInput(
            "Collection name may only contain letters, digits, '-', '_' and '.'".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Sanitize a client-declared filename to a safe stored file name.
/// Rejects a `..` path component; replaces anything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.split(|c| c == '/' || c == '\\').any(|c| c == "..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '_' || c == '.').is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Display name for a file: the declared name without its extension.
pub fn display_name(filename: &str) -> String {
    let path = std::path::Path::new(filename);
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(filename)
        .to_string()
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Pick the MIME type to record for an upload.
///
/// A concrete client hint wins; an absent or generic (`application/octet-stream`) hint
/// falls back to a guess from the file extension.
pub fn resolve_mime_type(hint: Option<&str>, filename: &str) -> String {
    if let Some(hint) = hint.map(normalize_mime_type) {
        if !hint.is_empty() && hint != OCTET_STREAM && hint.contains('/') {
            return hint;
        }
    }

    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}
