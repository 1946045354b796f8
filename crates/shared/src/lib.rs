//! Shared configuration and error types for the avatar service.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with their HTTP mapping
//! - Layered configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, StorageConfig, SupabaseConfig};
pub use error::{AppError, AppResult};
