use crate::api::oauth::provider_client::{HttpOAuthClient, OAuthProviderClient};
use crate::error::Result as ServerErrorResult;

use idlink_accounts::AccountService;
use idlink_auth::{CredentialHasher, TokenService};
use idlink_config::{Config, OAuthConfig, ValidationConfig};
use idlink_db::{IdentityRepository, IdentityStore};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub accounts: AccountService,
    /// Access tokens and OAuth `state` values
    pub tokens: Arc<TokenService>,
    pub oauth: Arc<OAuthConfig>,
    pub oauth_client: Arc<dyn OAuthProviderClient>,
    pub validation: Arc<ValidationConfig>,
}

impl AppState {
    /// Wire the account service over `pool` from validated configuration.
    pub fn from_config(pool: SqlitePool, config: &Config) -> ServerErrorResult<Self> {
        let hasher = CredentialHasher::new(
            config.auth.hash_memory_kib,
            config.auth.hash_iterations,
            config.auth.hash_parallelism,
        )?;
        let tokens = Arc::new(TokenService::with_hs256(
            config.auth.secret_bytes(),
            config.auth.token_ttl_secs,
            config.auth.leeway_secs,
        ));
        let store: Arc<dyn IdentityStore> = Arc::new(IdentityRepository::new(pool.clone()));

        Ok(Self {
            pool,
            accounts: AccountService::from_store(store, tokens.clone(), Arc::new(hasher)),
            tokens,
            oauth: Arc::new(config.oauth.clone()),
            oauth_client: Arc::new(HttpOAuthClient::new()?),
            validation: Arc::new(config.validation.clone()),
        })
    }

    /// Replace the provider client, e.g. with a canned one.
    pub fn with_oauth_client(mut self, client: Arc<dyn OAuthProviderClient>) -> Self {
        self.oauth_client = client;
        self
    }
}
