//! Error to HTTP response mapping.

use avatar_core::avatar::AvatarError;
use avatar_shared::AppError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// An `AppError` on its way out as an HTTP response.
///
/// Renders as `{"error": "<message>"}` with the error's status code.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AvatarError> for ApiError {
    fn from(err: AvatarError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
