//! Avatar service implementation.

use std::sync::Arc;

use chrono::Utc;

use super::error::AvatarError;
use super::types::{AvatarUpload, DEFAULT_CONTENT_TYPE, UploadedFile, avatar_path, cache_busted_url};
use crate::identity::{AuthError, AuthenticatedUser, IdentityProvider, bearer_token};
use crate::profile::{ProfileRecord, ProfileRepository};
use crate::storage::{AvatarStore, StoredObject};

/// Avatar upload pipeline.
///
/// Identity checks go through the caller-scoped `identity` provider; the
/// storage write and profile upsert go through `store` and `profiles`, which
/// hold the elevated credential.
#[derive(Clone)]
pub struct AvatarService {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn AvatarStore>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AvatarService {
    /// Create a new avatar service.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn AvatarStore>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            identity,
            store,
            profiles,
        }
    }

    /// Resolve the caller from the raw Authorization header value.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the header is absent, is not a bearer token,
    /// or the identity provider does not accept it.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, AvatarError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        Ok(self.identity.get_user(token).await?)
    }

    /// Store `file` as `user`'s avatar and point their profile at it.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails and `Profile` if the upsert fails.
    /// In the latter case the object has already been written and is left in
    /// place.
    pub async fn upload(
        &self,
        user: &AuthenticatedUser,
        file: UploadedFile,
    ) -> Result<AvatarUpload, AvatarError> {
        let path = avatar_path(&user.id, &file.name);

        self.store
            .upload(StoredObject {
                path: path.clone(),
                bytes: file.bytes,
                content_type: file
                    .content_type
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            })
            .await?;

        let now = Utc::now();
        let avatar_url = cache_busted_url(&self.store.public_url(&path), now);

        self.profiles
            .upsert(&ProfileRecord {
                id: user.id.clone(),
                avatar_url: avatar_url.clone(),
                updated_at: now,
            })
            .await?;

        Ok(AvatarUpload { path, avatar_url })
    }
}
