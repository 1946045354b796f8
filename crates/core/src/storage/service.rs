//! Avatar store trait and the OpenDAL-backed implementation.

use async_trait::async_trait;
use avatar_shared::config::StorageProvider;
use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};

use super::error::StorageError;

/// Bucket every avatar is written to.
pub const AVATAR_BUCKET: &str = "avatars";

/// Percent-encodes each `/`-separated segment of an object key.
///
/// Keys are built from client-supplied file names, so `#`, `?` and `%` must
/// not reach a URL unescaped.
#[must_use]
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// An object about to be written to the avatar bucket.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Key inside the bucket, `{user_id}/avatar.{ext}`.
    pub path: String,
    /// Raw file contents, stored as-is.
    pub bytes: Bytes,
    /// Content type recorded with the object where the backend supports it.
    pub content_type: String,
}

/// Write access to the avatar bucket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Write `object`, replacing whatever is stored at the same path.
    async fn upload(&self, object: StoredObject) -> Result<(), StorageError>;

    /// Public URL of the object at `path`. Does not check that it exists.
    fn public_url(&self, path: &str) -> String;
}

/// Avatar storage on any OpenDAL backend.
pub struct ObjectStorage {
    operator: Operator,
    public_url_base: String,
}

impl ObjectStorage {
    /// Create a storage service from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not OpenDAL-backed or cannot be
    /// initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let (operator, public_url_base) = Self::create_operator(provider)?;
        Ok(Self {
            operator,
            public_url_base,
        })
    }

    /// Create an in-process store. Objects vanish with the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory backend cannot be initialized.
    pub fn memory(public_url_base: impl Into<String>) -> Result<Self, StorageError> {
        let operator = Operator::new(services::Memory::default())
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            operator,
            public_url_base: public_url_base.into(),
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<(Operator, String), StorageError> {
        match provider {
            StorageProvider::Supabase => Err(StorageError::configuration(
                "the supabase provider is served by the Supabase Storage client",
            )),
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
                public_url_base,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(|op| Ok((op, public_url_base.clone())))
            }
            StorageProvider::LocalFs {
                root,
                public_url_base,
            } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(|op| Ok((op, public_url_base.clone())))
            }
        }
    }

    /// Check if an object exists in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    pub async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self.operator.stat(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Read an object back.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing is stored at `path`.
    pub async fn read(&self, path: &str) -> Result<Bytes, StorageError> {
        let buffer = self.operator.read(path).await?;
        Ok(buffer.to_bytes())
    }
}

#[async_trait]
impl AvatarStore for ObjectStorage {
    async fn upload(&self, object: StoredObject) -> Result<(), StorageError> {
        // OpenDAL writes replace existing objects, which gives upsert semantics.
        if self.operator.info().full_capability().write_with_content_type {
            self.operator
                .write_with(&object.path, object.bytes)
                .content_type(&object.content_type)
                .await?;
        } else {
            self.operator.write(&object.path, object.bytes).await?;
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.public_url_base.trim_end_matches('/'),
            encode_object_path(path)
        )
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
