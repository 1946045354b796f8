//! Profile upserts through PostgREST.

use async_trait::async_trait;
use avatar_core::profile::{PROFILES_TABLE, ProfileError, ProfileRecord, ProfileRepository};
use reqwest::Method;

use crate::client::SupabaseClient;
use crate::error::upstream_message;

/// `profiles` table written with the service-role key, bypassing RLS.
#[derive(Clone)]
pub struct SupabaseProfiles {
    client: SupabaseClient,
}

impl SupabaseProfiles {
    /// Create a new profile repository.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfiles {
    async fn upsert(&self, profile: &ProfileRecord) -> Result<(), ProfileError> {
        let response = self
            .client
            .admin()
            .request(Method::POST, &format!("/rest/v1/{PROFILES_TABLE}"))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(profile)
            .send()
            .await
            .map_err(|e| ProfileError::upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProfileError::upstream(upstream_message(response).await))
        }
    }
}
