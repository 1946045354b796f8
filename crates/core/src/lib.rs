//! Core avatar upload pipeline.
//!
//! This crate contains the request pipeline with ZERO web or database dependencies.
//! Platform access goes through the traits defined here and implemented by the
//! `avatar-supabase` and `avatar-db` crates.
//!
//! # Modules
//!
//! - `identity` - Bearer token parsing and delegated identity resolution
//! - `storage` - Avatar object storage (trait plus OpenDAL implementation)
//! - `profile` - Profile record persistence
//! - `avatar` - The upload pipeline tying the three together

pub mod avatar;
pub mod identity;
pub mod profile;
pub mod storage;
