//! Avatar pipeline error types.

use avatar_shared::AppError;
use thiserror::Error;

use crate::identity::AuthError;
use crate::profile::ProfileError;
use crate::storage::StorageError;

/// Client-facing message for a request without a `file` field.
pub const NO_FILE_PROVIDED: &str = "No file provided";

/// Avatar pipeline errors.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Caller could not be identified.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// The form had no `file` field.
    #[error("No file provided")]
    NoFileProvided,

    /// The request body could not be read as multipart form data.
    #[error("{0}")]
    InvalidForm(String),

    /// Writing the object failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Upserting the profile failed. The uploaded object stays in storage.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl AvatarError {
    /// Create an invalid form error.
    #[must_use]
    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Self::InvalidForm(msg.into())
    }
}

impl From<AvatarError> for AppError {
    fn from(err: AvatarError) -> Self {
        match err {
            AvatarError::Unauthorized(e) => e.into(),
            AvatarError::NoFileProvided => Self::BadRequest(NO_FILE_PROVIDED.to_string()),
            AvatarError::InvalidForm(msg) => Self::Internal(msg),
            AvatarError::Storage(e) => e.into(),
            AvatarError::Profile(e) => e.into(),
        }
    }
}
