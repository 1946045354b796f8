//! Profile record persistence.
//!
//! The service only ever upserts the avatar columns of a profile. Rows are
//! keyed by user ID and never deleted here.

mod error;

pub use error::ProfileError;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Table the profile rows live in.
pub const PROFILES_TABLE: &str = "profiles";

/// Avatar columns of a profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    /// User ID, the primary key.
    pub id: String,
    /// Public avatar URL including the cache-busting `t` parameter.
    pub avatar_url: String,
    /// When the avatar last changed.
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for profile persistence.
///
/// Implementations write with elevated rights so row-level security on the
/// profiles table does not apply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert the row, or update it if one with the same `id` exists.
    async fn upsert(&self, profile: &ProfileRecord) -> Result<(), ProfileError>;
}
