//! Delegated identity resolution.
//!
//! The service never validates tokens itself. It extracts the bearer token
//! from the request and asks the identity provider who the caller is, using
//! only the caller's own credentials.

mod error;
mod types;

pub use error::AuthError;
pub use types::{AuthenticatedUser, bearer_token};

use async_trait::async_trait;

/// Resolves a caller's access token to a user.
///
/// Implementations must authenticate with the caller's token and the public
/// anon key only. Elevated credentials do not belong here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up the user that owns `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}
