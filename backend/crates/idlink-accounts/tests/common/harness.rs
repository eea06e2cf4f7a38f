use idlink_accounts::{AccountService, SignupRequest};
use idlink_auth::{CredentialHasher, TokenService};
use idlink_core::ProviderProfile;
use idlink_db::{IdentityRepository, IdentityStore};

use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub struct TestHarness {
    pub service: AccountService,
    pub repo: IdentityRepository,
    pub tokens: Arc<TokenService>,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_store(|repo| Arc::new(repo) as Arc<dyn IdentityStore>).await
    }

    /// Service over a store built from the backing repository, e.g. a wrapper
    /// that hides records to simulate a concurrent writer.
    pub async fn with_store<F>(wrap: F) -> Self
    where
        F: FnOnce(IdentityRepository) -> Arc<dyn IdentityStore>,
    {
        let repo = IdentityRepository::new(create_test_pool().await);
        let store = wrap(repo.clone());
        let tokens = Arc::new(TokenService::with_hs256(TEST_SECRET, 3600, 0));
        let hasher = Arc::new(CredentialHasher::new(4096, 1, 1).unwrap());

        let service = AccountService::from_store(store, tokens.clone(), hasher);

        Self {
            service,
            repo,
            tokens,
        }
    }
}

async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    idlink_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn signup_request(email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        email: email.to_string(),
        password: password.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
    }
}

pub fn google_profile(external_id: &str, email: &str) -> ProviderProfile {
    ProviderProfile {
        external_id: external_id.to_string(),
        email: Some(email.to_string()),
        display_name: Some("Google Person".to_string()),
        given_name: Some("Gina".to_string()),
        family_name: Some("Google".to_string()),
        avatar_url: Some("https://example.com/g.png".to_string()),
        ..Default::default()
    }
}

pub fn github_profile(external_id: &str, username: &str) -> ProviderProfile {
    ProviderProfile {
        external_id: external_id.to_string(),
        display_name: Some("Octo Cat".to_string()),
        username: Some(username.to_string()),
        ..Default::default()
    }
}
