//! The avatar upload pipeline.
//!
//! Authenticate the caller, write the file to `{user_id}/avatar.{ext}`,
//! resolve a cache-busted public URL and upsert it onto the caller's profile.
//! Steps run strictly in order; the first failure ends the request and
//! nothing already written is rolled back.

mod error;
mod service;
mod types;

pub use error::AvatarError;
pub use service::AvatarService;
pub use types::{
    AvatarUpload, DEFAULT_CONTENT_TYPE, UploadedFile, avatar_path, cache_busted_url,
    file_extension,
};
