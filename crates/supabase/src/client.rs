//! Supabase HTTP client and its credential scopes.

use std::time::Duration;

use avatar_core::storage::encode_object_path;
use avatar_shared::SupabaseConfig;
use reqwest::{Method, RequestBuilder};

use crate::error::SupabaseError;

/// Pooled HTTP client bound to one Supabase project.
///
/// Requests are never sent from here directly. Callers pick a scope first:
/// [`SupabaseClient::user_scoped`] for anything that must run with the
/// caller's own rights, [`SupabaseClient::admin`] for writes that bypass
/// row-level security. Both are cheap borrowed views, built per request.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("avatar-service/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http(http, config))
    }

    /// Create a client around an existing HTTP client.
    #[must_use]
    pub fn with_http(http: reqwest::Client, config: &SupabaseConfig) -> Self {
        Self {
            http,
            url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        }
    }

    /// View that acts as the caller: anon key plus the caller's access token.
    #[must_use]
    pub fn user_scoped<'a>(&'a self, access_token: &'a str) -> ScopedClient<'a> {
        ScopedClient {
            http: &self.http,
            base_url: &self.url,
            api_key: &self.anon_key,
            bearer: access_token,
        }
    }

    /// View that acts with the service-role key.
    #[must_use]
    pub fn admin(&self) -> ScopedClient<'_> {
        ScopedClient {
            http: &self.http,
            base_url: &self.url,
            api_key: &self.service_role_key,
            bearer: &self.service_role_key,
        }
    }

    /// Public URL of an object in a public bucket, with the key escaped.
    #[must_use]
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.url,
            urlencoding::encode(bucket),
            encode_object_path(path)
        )
    }

    /// Project URL without a trailing slash.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A [`SupabaseClient`] bound to one set of credentials.
#[derive(Clone, Copy)]
pub struct ScopedClient<'a> {
    http: &'a reqwest::Client,
    base_url: &'a str,
    api_key: &'a str,
    bearer: &'a str,
}

impl ScopedClient<'_> {
    /// Start a request to `path` (relative to the project URL) carrying this
    /// scope's `apikey` and bearer credentials.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header("apikey", self.api_key)
            .bearer_auth(self.bearer)
    }
}
