//! Profile error types.

use avatar_shared::AppError;
use thiserror::Error;

/// Profile persistence errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The user ID cannot be used as a key by this backend.
    #[error("invalid user id: {0}")]
    InvalidUserId(String),

    /// The database rejected or failed the write.
    ///
    /// Carries the backend's own message, unmodified.
    #[error("{0}")]
    Upstream(String),
}

impl ProfileError {
    /// Create an upstream error.
    #[must_use]
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        Self::Upstream(err.to_string())
    }
}
