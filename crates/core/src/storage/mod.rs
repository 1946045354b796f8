//! Avatar object storage.
//!
//! Avatars live in a single bucket, one object per user and extension:
//!
//! ```text
//! avatars/
//! └── {user_id}/avatar.{ext}     (overwritten on every upload)
//! ```
//!
//! [`AvatarStore`] is the seam the pipeline writes through. The Supabase
//! Storage REST implementation lives in `avatar-supabase`; [`ObjectStorage`]
//! covers every backend Apache OpenDAL speaks:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write("key", data)      │ op.stat("key")                     │
//! │ op.read("key")             │                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::{AVATAR_BUCKET, AvatarStore, ObjectStorage, StoredObject, encode_object_path};

#[cfg(test)]
pub use service::MockAvatarStore;
