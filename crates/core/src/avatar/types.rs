//! Avatar pipeline types and path rules.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Content type recorded when the client did not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received in the `file` form field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub name: String,
    /// Client-declared content type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Bytes,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Key the object was written to.
    pub path: String,
    /// URL stored on the profile and returned to the client.
    pub avatar_url: String,
}

/// Extension of `file_name`: everything after the last `.`.
///
/// A name without a dot has an empty extension.
#[must_use]
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// Storage key for a user's avatar: `{user_id}/avatar.{ext}`.
///
/// Deterministic in user and extension, so repeat uploads overwrite.
#[must_use]
pub fn avatar_path(user_id: &str, file_name: &str) -> String {
    format!("{user_id}/avatar.{}", file_extension(file_name))
}

/// Appends the `t` cache-busting parameter (epoch milliseconds).
#[must_use]
pub fn cache_busted_url(public_url: &str, at: DateTime<Utc>) -> String {
    format!("{public_url}?t={}", at.timestamp_millis())
}
