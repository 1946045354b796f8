//! Avatar upload route.

use avatar_core::avatar::{AvatarError, UploadedFile};
use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, header::ACCESS_CONTROL_ALLOW_ORIGIN},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Serialize;
use tracing::{error, info};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Name of the form field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Creates the avatar upload routes.
///
/// Served at the root and under the function's deployed name; any method is
/// accepted.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", any(upload_avatar))
        .route("/upload-avatar", any(upload_avatar))
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAvatarResponse {
    /// Public, cache-busted URL of the new avatar.
    pub avatar_url: String,
}

/// Upload the caller's avatar and record its URL on their profile.
async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let file = read_file_field(multipart).await?;

    match state.avatars.upload(auth.user(), file).await {
        Ok(upload) => {
            info!(
                user_id = %auth.user_id(),
                path = %upload.path,
                "Avatar uploaded"
            );

            Ok((
                StatusCode::OK,
                [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                Json(UploadAvatarResponse {
                    avatar_url: upload.avatar_url,
                }),
            )
                .into_response())
        }
        Err(e) => {
            let orphaned = matches!(e, AvatarError::Profile(_));
            let err = ApiError::from(e);
            let code = err.0.error_code();
            if orphaned {
                error!(
                    user_id = %auth.user_id(),
                    code,
                    error = %err.0,
                    "Profile upsert failed; uploaded object left without a profile reference"
                );
            } else {
                error!(user_id = %auth.user_id(), code, error = %err.0, "Avatar upload failed");
            }
            Err(err)
        }
    }
}

/// Pull the first file-bearing `file` field out of the form.
///
/// A `file` field without a file name (a plain text value) does not count.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedFile, AvatarError> {
    let mut multipart = multipart.map_err(|e| AvatarError::invalid_form(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AvatarError::invalid_form(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AvatarError::invalid_form(e.body_text()))?;

        return Ok(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }

    Err(AvatarError::NoFileProvided)
}
