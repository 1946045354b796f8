//! Supabase error types and upstream message extraction.

use serde::Deserialize;
use thiserror::Error;

/// Supabase client errors.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error payload shapes returned by Auth, Storage and PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

/// Best human-readable message from a failed response.
///
/// Prefers the platform's `message`, then `error`, `msg` and
/// `error_description`, then the HTTP status line.
pub(crate) async fn upstream_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    message_from_body(&body).unwrap_or_else(|| status.to_string())
}

fn message_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .or(parsed.msg)
        .or(parsed.error_description)
        .filter(|m| !m.is_empty())
}
