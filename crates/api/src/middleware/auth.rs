//! Authentication middleware for the upload endpoint.

use avatar_core::identity::AuthenticatedUser;
use avatar_shared::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{AppState, error::ApiError};

/// Authentication middleware that resolves the caller through the identity
/// provider.
///
/// This middleware:
/// 1. Reads the Authorization header
/// 2. Resolves the bearer token with the caller-scoped identity client
/// 3. Stores the user in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let result = state.avatars.authenticate(auth_header).await;

    match result {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let detail = e.to_string();
            let err = ApiError::from(e);
            warn!(
                code = err.0.error_code(),
                error = %detail,
                "Rejected unauthenticated request"
            );
            err.into_response()
        }
    }
}

/// Extractor for the authenticated caller.
///
/// Use this in handlers behind [`auth_middleware`]:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.0.id
    }

    /// Returns the inner user.
    #[must_use]
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError(AppError::Unauthorized))
    }
}
