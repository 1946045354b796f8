//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod avatar;
pub mod health;

/// Creates the API router with all routes.
///
/// The upload routes sit behind authentication; the health check is public.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let upload_routes =
        avatar::routes().layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(upload_routes)
}
