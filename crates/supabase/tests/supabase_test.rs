//! Integration tests for the Supabase adapters against a mock platform.

use avatar_core::avatar::{avatar_path, cache_busted_url};
use avatar_core::identity::{AuthError, IdentityProvider};
use avatar_core::profile::{ProfileError, ProfileRecord, ProfileRepository};
use avatar_core::storage::{AvatarStore, StorageError, StoredObject};
use avatar_shared::SupabaseConfig;
use avatar_supabase::{SupabaseClient, SupabaseIdentity, SupabaseProfiles, SupabaseStorage};
use bytes::Bytes;
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_bytes, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "8d0f6a4e-1c2b-4f0e-9a57-3f1a2b3c4d5e";

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&SupabaseConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
        service_role_key: "service-key".to_string(),
    })
    .expect("client")
}

#[tokio::test]
async fn test_identity_uses_caller_token_and_anon_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer caller-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "aud": "authenticated",
            "email": "someone@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = SupabaseIdentity::new(client(&server));
    let user = identity.get_user("caller-token").await.expect("user");

    assert_eq!(user.id, USER_ID);
    assert_eq!(user.email.as_deref(), Some("someone@example.com"));
}

#[tokio::test]
async fn test_identity_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "error_code": "bad_jwt",
            "msg": "invalid JWT: unable to parse or verify signature"
        })))
        .mount(&server)
        .await;

    let identity = SupabaseIdentity::new(client(&server));
    let err = identity.get_user("forged").await.unwrap_err();

    match err {
        AuthError::InvalidToken(msg) => assert!(msg.starts_with("invalid JWT")),
        other => panic!("expected InvalidToken, got {other:?}"),
    }
}

#[tokio::test]
async fn test_identity_null_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let identity = SupabaseIdentity::new(client(&server));
    let err = identity.get_user("token").await.unwrap_err();
    assert!(matches!(err, AuthError::NoUser));
}

#[tokio::test]
async fn test_identity_platform_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let identity = SupabaseIdentity::new(client(&server));
    let err = identity.get_user("token").await.unwrap_err();
    assert!(matches!(err, AuthError::Upstream(_)));
}

#[tokio::test]
async fn test_storage_upload_upserts_with_service_role() {
    let server = MockServer::start().await;
    let object_path = format!("/storage/v1/object/avatars/{USER_ID}/avatar.png");
    Mock::given(method("POST"))
        .and(path(object_path.as_str()))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("x-upsert", "true"))
        .and(header("content-type", "image/png"))
        .and(body_bytes(b"\x89PNG".to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": format!("avatars/{USER_ID}/avatar.png")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = SupabaseStorage::new(client(&server));
    storage
        .upload(StoredObject {
            path: format!("{USER_ID}/avatar.png"),
            bytes: Bytes::from_static(b"\x89PNG"),
            content_type: "image/png".to_string(),
        })
        .await
        .expect("upload");
}

#[tokio::test]
async fn test_storage_key_with_reserved_characters_is_escaped() {
    let server = MockServer::start().await;
    let object_path = format!("/storage/v1/object/avatars/{USER_ID}/avatar.png%232");
    Mock::given(method("POST"))
        .and(path(object_path.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = SupabaseStorage::new(client(&server));
    let key = avatar_path(USER_ID, "me.png#2");
    assert_eq!(key, format!("{USER_ID}/avatar.png#2"));

    storage
        .upload(StoredObject {
            path: key.clone(),
            bytes: Bytes::from_static(b"x"),
            content_type: "image/png".to_string(),
        })
        .await
        .expect("upload");

    let avatar_url = cache_busted_url(&storage.public_url(&key), Utc::now());
    let url = reqwest::Url::parse(&avatar_url).expect("valid url");
    assert_eq!(
        url.path(),
        format!("/storage/v1/object/public/avatars/{USER_ID}/avatar.png%232")
    );
    assert!(url.fragment().is_none());
    let t = url
        .query_pairs()
        .find(|(name, _)| name == "t")
        .map(|(_, value)| value.parse::<i64>());
    assert!(matches!(t, Some(Ok(_))));
}

#[tokio::test]
async fn test_storage_error_message_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": "404",
            "error": "Bucket not found",
            "message": "Bucket not found"
        })))
        .mount(&server)
        .await;

    let storage = SupabaseStorage::new(client(&server));
    let err = storage
        .upload(StoredObject {
            path: "u/avatar.png".to_string(),
            bytes: Bytes::from_static(b"x"),
            content_type: "image/png".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Upstream(_)));
    assert_eq!(err.to_string(), "Bucket not found");
}

#[tokio::test]
async fn test_storage_public_url() {
    let server = MockServer::start().await;
    let storage = SupabaseStorage::new(client(&server));

    assert_eq!(
        storage.public_url("u/avatar.png"),
        format!("{}/storage/v1/object/public/avatars/u/avatar.png", server.uri())
    );
}

#[tokio::test]
async fn test_profile_upsert_merges_on_primary_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .and(body_partial_json(json!({
            "id": USER_ID,
            "avatar_url": "https://x/avatars/u/avatar.png?t=42"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let profiles = SupabaseProfiles::new(client(&server));
    profiles
        .upsert(&ProfileRecord {
            id: USER_ID.to_string(),
            avatar_url: "https://x/avatars/u/avatar.png?t=42".to_string(),
            updated_at: Utc::now(),
        })
        .await
        .expect("upsert");
}

#[tokio::test]
async fn test_profile_upsert_error_message_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "details": null,
            "hint": null,
            "message": "relation \"public.profiles\" does not exist"
        })))
        .mount(&server)
        .await;

    let profiles = SupabaseProfiles::new(client(&server));
    let err = profiles
        .upsert(&ProfileRecord {
            id: USER_ID.to_string(),
            avatar_url: "https://x".to_string(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::Upstream(_)));
    assert_eq!(err.to_string(), "relation \"public.profiles\" does not exist");
}
