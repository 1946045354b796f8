//! Supabase adapters for the avatar service.
//!
//! This crate provides:
//! - [`SupabaseClient`], one pooled HTTP client with two scoped views: a
//!   user-scoped view (anon key plus the caller's token) and an admin view
//!   (service-role key)
//! - [`SupabaseIdentity`], identity resolution through Supabase Auth
//! - [`SupabaseStorage`], avatar writes through Supabase Storage
//! - [`SupabaseProfiles`], profile upserts through PostgREST

mod auth;
mod client;
mod error;
mod rest;
mod storage;

pub use auth::SupabaseIdentity;
pub use client::{ScopedClient, SupabaseClient};
pub use error::SupabaseError;
pub use rest::SupabaseProfiles;
pub use storage::SupabaseStorage;
