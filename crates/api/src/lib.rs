//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The avatar upload endpoint
//! - CORS pre-flight and authentication middleware
//! - Error to response mapping
//! - Health check

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use avatar_core::avatar::AvatarService;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Avatar upload pipeline.
    pub avatars: Arc<AvatarService>,
    /// Largest request body the upload endpoint reads.
    pub max_upload_bytes: usize,
    /// Name of the configured storage backend, reported by the health check.
    pub storage_provider: &'static str,
}

/// Creates the main application router.
///
/// Pre-flight handling wraps everything else, so `OPTIONS` is acknowledged on
/// every path.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(middleware::preflight_middleware))
        .with_state(state)
}
