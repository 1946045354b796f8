//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// `Display` is the exact message returned to clients in the `error` field.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or rejected bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed client input.
    #[error("{0}")]
    BadRequest(String),

    /// Storage or database failure; the upstream message is passed through.
    #[error("{0}")]
    Upstream(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::BadRequest(_) => 400,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a stable code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized.status_code(), 401);
        assert_eq!(AppError::BadRequest(String::new()).status_code(), 400);
        assert_eq!(AppError::Upstream(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(
            AppError::BadRequest(String::new()).error_code(),
            "BAD_REQUEST"
        );
        assert_eq!(
            AppError::Upstream(String::new()).error_code(),
            "UPSTREAM_FAILURE"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display_is_client_message() {
        assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            AppError::BadRequest("No file provided".into()).to_string(),
            "No file provided"
        );
        assert_eq!(
            AppError::Upstream("Bucket not found".into()).to_string(),
            "Bucket not found"
        );
    }
}
