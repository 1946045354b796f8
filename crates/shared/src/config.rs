//! Application configuration management.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Supabase platform endpoint and credentials.
    #[serde(default)]
    pub supabase: SupabaseConfig,
    /// Avatar object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Direct Postgres access for profile upserts (optional).
    ///
    /// When absent, profiles are written through Supabase PostgREST.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest request body accepted by the upload endpoint.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Supabase platform configuration.
///
/// Missing values fall back to empty strings; requests against an unconfigured
/// platform then fail upstream rather than at startup.
#[derive(Clone, Default, Deserialize)]
pub struct SupabaseConfig {
    /// Platform endpoint, e.g. `https://abc.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// Public anon key, used for user-scoped identity checks.
    #[serde(default)]
    pub anon_key: String,
    /// Service-role key. Bypasses row-level security; never log it.
    #[serde(default)]
    pub service_role_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &redact(&self.anon_key))
            .field("service_role_key", &redact(&self.service_role_key))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

/// Object storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Where avatar objects are written.
    #[serde(default)]
    pub provider: StorageProvider,
}

/// Storage provider configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Supabase Storage REST API, authenticated with the service-role key.
    #[default]
    Supabase,
    /// S3-compatible storage: Supabase S3 gateway, Cloudflare R2, AWS S3.
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        #[serde(default = "default_bucket")]
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        #[serde(default = "default_region")]
        region: String,
        /// Prefix public URLs are built from.
        public_url_base: String,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
        /// Prefix public URLs are built from.
        public_url_base: String,
    },
}

fn default_bucket() -> String {
    "avatars".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}

impl StorageProvider {
    /// Provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Precedence, lowest first: `config/default`, `config/{RUN_MODE}`,
    /// `AVATAR__*` variables, then `SUPABASE_URL`, `SUPABASE_ANON_KEY` and
    /// `SUPABASE_SERVICE_ROLE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AVATAR").separator("__"))
            .set_override_option("supabase.url", std::env::var("SUPABASE_URL").ok())?
            .set_override_option("supabase.anon_key", std::env::var("SUPABASE_ANON_KEY").ok())?
            .set_override_option(
                "supabase.service_role_key",
                std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}
