//! Identity error types.

use avatar_shared::AppError;
use thiserror::Error;

/// Identity resolution errors.
///
/// Every variant surfaces to clients as `Unauthorized`; the detail is for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable bearer token in the request.
    #[error("missing or malformed bearer token")]
    MissingToken,

    /// The identity provider rejected the token.
    #[error("token rejected: {0}")]
    InvalidToken(String),

    /// The identity provider answered without a user.
    #[error("no user for token")]
    NoUser,

    /// The identity provider could not be reached or answered unexpectedly.
    #[error("identity provider error: {0}")]
    Upstream(String),
}

impl AuthError {
    /// Create an invalid token error.
    #[must_use]
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    /// Create an upstream error.
    #[must_use]
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        Self::Unauthorized
    }
}
