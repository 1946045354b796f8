//! Request middleware.

pub mod auth;
pub mod cors;

pub use auth::{AuthUser, auth_middleware};
pub use cors::{ALLOWED_HEADERS, preflight_middleware};
