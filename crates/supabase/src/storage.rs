//! Avatar writes through Supabase Storage.

use async_trait::async_trait;
use avatar_core::storage::{
    AVATAR_BUCKET, AvatarStore, StorageError, StoredObject, encode_object_path,
};
use reqwest::Method;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use crate::client::SupabaseClient;
use crate::error::upstream_message;

/// Supabase Storage bucket written with the service-role key.
#[derive(Clone)]
pub struct SupabaseStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseStorage {
    /// Create a store for the avatar bucket.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self::with_bucket(client, AVATAR_BUCKET)
    }

    /// Create a store for another bucket.
    #[must_use]
    pub fn with_bucket(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl AvatarStore for SupabaseStorage {
    async fn upload(&self, object: StoredObject) -> Result<(), StorageError> {
        debug!(
            bucket = %self.bucket,
            path = %object.path,
            size = object.bytes.len(),
            "Writing object to Supabase Storage"
        );

        let response = self
            .client
            .admin()
            .request(
                Method::POST,
                &format!(
                    "/storage/v1/object/{}/{}",
                    urlencoding::encode(&self.bucket),
                    encode_object_path(&object.path)
                ),
            )
            .header("x-upsert", "true")
            .header(CACHE_CONTROL, "max-age=3600")
            .header(CONTENT_TYPE, object.content_type)
            .body(object.bytes)
            .send()
            .await
            .map_err(|e| StorageError::upstream(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StorageError::upstream(upstream_message(response).await))
        }
    }

    fn public_url(&self, path: &str) -> String {
        self.client.public_object_url(&self.bucket, path)
    }
}
