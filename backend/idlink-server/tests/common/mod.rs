#![allow(dead_code)]

//! Test infrastructure for idlink-server API tests

use idlink_config::{Config, OAuthProviderConfig};
use idlink_core::{OAuthProvider, ProviderProfile};
use idlink_server::{AppState, OAuthClientError, OAuthProviderClient, build_router};

use std::collections::HashMap;
use std::panic::Location;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::LOCATION},
};
use async_trait::async_trait;
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use reqwest::Url;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";
pub const FRONTEND_URL: &str = "http://localhost:3000";

/// Single-connection in-memory pool, so every query sees the same database.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse sqlite url");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    idlink_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Config with a signing secret, both providers configured and cheap hashing.
pub fn test_config() -> Config {
    let mut config = Config::default();

    config.auth.jwt_secret = Some(TEST_SECRET.to_string());
    config.auth.token_ttl_secs = 3600;
    config.auth.leeway_secs = 0;
    config.auth.hash_memory_kib = 4096;
    config.auth.hash_iterations = 1;
    config.auth.hash_parallelism = 1;

    config.oauth.frontend_url = FRONTEND_URL.to_string();
    config.oauth.google = Some(OAuthProviderConfig {
        client_id: "google-client".to_string(),
        client_secret: "google-secret".to_string(),
        redirect_url: "http://localhost:8000/api/auth/google/callback".to_string(),
    });
    config.oauth.github = Some(OAuthProviderConfig {
        client_id: "github-client".to_string(),
        client_secret: "github-secret".to_string(),
        redirect_url: "http://localhost:8000/api/auth/github/callback".to_string(),
    });

    config
}

pub async fn create_test_app_state_with(config: &Config) -> AppState {
    let pool = create_test_pool().await;
    AppState::from_config(pool, config).expect("Failed to build app state")
}

pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with(&test_config()).await
}

/// Send one request through the router and decode the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Sign up through the API and return the issued token.
pub async fn signup(app: &Router, email: &str, password: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "firstName": "Ann",
            "lastName": "Lee",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", json);
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Provider client answering from a code -> profile table instead of the network.
#[derive(Default)]
pub struct StubOAuthClient {
    profiles: Mutex<HashMap<String, ProviderProfile>>,
}

impl StubOAuthClient {
    /// Make `code` exchangeable for `profile`.
    pub fn register(&self, code: &str, profile: ProviderProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(code.to_string(), profile);
    }
}

#[async_trait]
impl OAuthProviderClient for StubOAuthClient {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        _config: &OAuthProviderConfig,
        code: &str,
    ) -> Result<ProviderProfile, OAuthClientError> {
        self.profiles
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| OAuthClientError::Rejected {
                provider,
                message: "bad_verification_code".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Router over `config` whose provider exchanges go to the returned stub.
pub async fn create_oauth_app_with(config: &Config) -> (Router, Arc<StubOAuthClient>) {
    let stub = Arc::new(StubOAuthClient::default());
    let state = create_test_app_state_with(config)
        .await
        .with_oauth_client(stub.clone());

    (build_router(state), stub)
}

pub async fn create_oauth_app() -> (Router, Arc<StubOAuthClient>) {
    create_oauth_app_with(&test_config()).await
}

/// GET `uri` and return the status with the parsed `Location` header, if any.
pub async fn follow(app: &Router, uri: &str) -> (StatusCode, Option<Url>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let location = response
        .headers()
        .get(LOCATION)
        .map(|value| Url::parse(value.to_str().unwrap()).unwrap());

    (response.status(), location)
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Run `/start` and return the `state` the server handed to the provider.
pub async fn start_state(app: &Router, provider: &str) -> String {
    let (status, location) = follow(app, &format!("/api/auth/{}/start", provider)).await;

    assert!(status.is_redirection(), "start failed: {}", status);
    query_param(&location.unwrap(), "state").unwrap()
}

/// Provider redirect back to `/callback` with `code` and `state`.
pub async fn oauth_callback(
    app: &Router,
    provider: &str,
    code: &str,
    state: &str,
) -> (StatusCode, Option<Url>) {
    let uri = format!(
        "/api/auth/{}/callback?code={}&state={}",
        provider, code, state
    );
    follow(app, &uri).await
}

/// Full start -> provider -> callback round with `profile` behind a fresh code.
/// Returns the frontend URL the browser lands on.
pub async fn oauth_login(
    app: &Router,
    stub: &StubOAuthClient,
    provider: &str,
    profile: ProviderProfile,
) -> Url {
    let code = format!("code-{}", uuid::Uuid::new_v4().simple());
    stub.register(&code, profile);

    let state = start_state(app, provider).await;
    let (status, location) = oauth_callback(app, provider, &code, &state).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    location.unwrap()
}

/// `oauth_login` that must succeed; returns the issued bearer token.
pub async fn oauth_token(
    app: &Router,
    stub: &StubOAuthClient,
    provider: &str,
    profile: ProviderProfile,
) -> String {
    let landing = oauth_login(app, stub, provider, profile).await;

    assert_eq!(landing.path(), "/auth/callback", "login failed: {}", landing);
    query_param(&landing, "token").unwrap()
}

pub fn profile(external_id: &str, email: Option<&str>, display_name: &str) -> ProviderProfile {
    ProviderProfile {
        external_id: external_id.to_string(),
        email: email.map(str::to_string),
        display_name: Some(display_name.to_string()),
        ..ProviderProfile::default()
    }
}
