//! Avatar Upload Server
//!
//! Main entry point for the avatar upload service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use avatar_api::{AppState, create_router};
use avatar_core::avatar::AvatarService;
use avatar_core::profile::ProfileRepository;
use avatar_core::storage::{AvatarStore, ObjectStorage};
use avatar_db::{PgProfileRepository, connect_with};
use avatar_shared::{AppConfig, config::StorageProvider};
use avatar_supabase::{SupabaseClient, SupabaseIdentity, SupabaseProfiles, SupabaseStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let fmt_layer = if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar=debug,tower_http=debug".into()),
        )
        .with(fmt_layer)
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(supabase = ?config.supabase, "Configuration loaded");

    let supabase = SupabaseClient::new(&config.supabase)?;

    // Avatar storage
    let store: Arc<dyn AvatarStore> = match &config.storage.provider {
        StorageProvider::Supabase => Arc::new(SupabaseStorage::new(supabase.clone())),
        provider => Arc::new(ObjectStorage::from_provider(provider)?),
    };
    info!(
        provider = config.storage.provider.name(),
        "Storage configured"
    );

    // Profile persistence
    let profiles: Arc<dyn ProfileRepository> = match &config.database {
        Some(database) => {
            let db = connect_with(database).await?;
            info!("Connected to database");
            Arc::new(PgProfileRepository::new(db))
        }
        None => Arc::new(SupabaseProfiles::new(supabase.clone())),
    };

    // Create application state
    let avatars = AvatarService::new(Arc::new(SupabaseIdentity::new(supabase)), store, profiles);
    let state = AppState {
        avatars: Arc::new(avatars),
        max_upload_bytes: config.server.max_upload_bytes,
        storage_provider: config.storage.provider.name(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
