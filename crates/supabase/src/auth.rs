//! Identity resolution through Supabase Auth.

use async_trait::async_trait;
use avatar_core::identity::{AuthError, AuthenticatedUser, IdentityProvider};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::SupabaseClient;
use crate::error::upstream_message;

/// Resolves access tokens with `GET /auth/v1/user`.
///
/// Every lookup runs through [`SupabaseClient::user_scoped`], so the only
/// rights exercised are the caller's own.
#[derive(Clone)]
pub struct SupabaseIdentity {
    client: SupabaseClient,
}

impl SupabaseIdentity {
    /// Create a new identity provider.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .client
            .user_scoped(access_token)
            .request(Method::GET, "/auth/v1/user")
            .send()
            .await
            .map_err(|e| AuthError::upstream(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Option<AuthenticatedUser>>()
                .await
                .map_err(|e| AuthError::upstream(e.to_string()))?
                .ok_or(AuthError::NoUser),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::invalid_token(upstream_message(response).await))
            }
            status => {
                debug!(%status, "Unexpected status from Supabase Auth");
                Err(AuthError::upstream(upstream_message(response).await))
            }
        }
    }
}
