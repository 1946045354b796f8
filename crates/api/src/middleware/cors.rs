//! CORS pre-flight handling.

use axum::{
    extract::Request,
    http::{
        Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Request headers browsers may send to the upload endpoint.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Answers every `OPTIONS` request with a permissive CORS acknowledgment.
///
/// Runs before authentication; pre-flight requests carry no credentials.
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::OK,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            ],
            "ok",
        )
            .into_response();
    }

    next.run(request).await
}
