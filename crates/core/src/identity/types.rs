//! Identity types.

use serde::Deserialize;

/// The caller behind a verified access token.
///
/// Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    /// Opaque user identifier.
    pub id: String,
    /// E-mail reported by the identity provider, if any.
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Create a user with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

/// Extracts the bearer token from an Authorization header value.
///
/// Returns `None` for other schemes and for empty tokens.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
