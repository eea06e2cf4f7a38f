//! Auth use cases: signup, signin, OAuth callback, token authentication and
//! the profile operations that run on an already-authenticated identity.

use crate::{
    AccountError, AccountLinker, AuthSession, IdentityResolver, IdentityStats, ProfileUpdate,
    Result as AccountErrorResult, SignupRequest,
};

use idlink_auth::{CredentialHasher, TokenService};
use idlink_core::{Identity, OAuthProvider, ProviderProfile, normalize_email};
use idlink_db::{DbError, IdentityStore};

use std::sync::Arc;

use log::{info, warn};

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn IdentityStore>,
    resolver: IdentityResolver,
    linker: AccountLinker,
    tokens: Arc<TokenService>,
    hasher: Arc<CredentialHasher>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        resolver: IdentityResolver,
        linker: AccountLinker,
        tokens: Arc<TokenService>,
        hasher: Arc<CredentialHasher>,
    ) -> Self {
        Self {
            store,
            resolver,
            linker,
            tokens,
            hasher,
        }
    }

    /// Wire resolver and linker over a single store.
    pub fn from_store(
        store: Arc<dyn IdentityStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<CredentialHasher>,
    ) -> Self {
        let resolver = IdentityResolver::new(store.clone());
        let linker = AccountLinker::new(store.clone(), resolver.clone());
        Self::new(store, resolver, linker, tokens, hasher)
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Create an email-partition identity. Fails if the email exists in any partition.
    pub async fn signup(&self, request: SignupRequest) -> AccountErrorResult<AuthSession> {
        let email = normalize_email(&request.email);

        if let Some(existing) = self.resolver.resolve_by_email(&email).await? {
            info!(
                "Signup rejected: {} already registered in {} partition",
                email,
                existing.partition()
            );
            return Err(AccountError::already_exists(
                "User with this email already exists",
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let identity = Identity::new_local(
            email,
            password_hash,
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
        );

        match self.store.create(identity.partition(), &identity).await {
            Ok(()) => {}
            Err(DbError::DuplicateKey { .. }) => {
                info!("Signup lost a race for {}", identity.email);
                return Err(AccountError::already_exists(
                    "User with this email already exists",
                ));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Signed up identity {} ({})", identity.id, identity.email);
        self.session_for(identity)
    }

    /// Password signin. Every failure cause yields the same `InvalidCredentials`
    /// after the same amount of hashing work.
    pub async fn signin(&self, email: &str, password: &str) -> AccountErrorResult<AuthSession> {
        let Some(mut identity) = self.resolver.resolve_by_email(email).await? else {
            self.hasher.verify_against_dummy(password)?;
            info!("Signin failed: no identity for {}", normalize_email(email));
            return Err(AccountError::invalid_credentials());
        };

        let Some(digest) = identity.password_hash.as_deref() else {
            self.hasher.verify_against_dummy(password)?;
            info!(
                "Signin failed: identity {} in {} partition has no password",
                identity.id,
                identity.partition()
            );
            return Err(AccountError::invalid_credentials());
        };

        if !self.hasher.verify(password, digest)? {
            info!("Signin failed: wrong password for identity {}", identity.id);
            return Err(AccountError::invalid_credentials());
        }

        identity.record_login();
        self.store.save(identity.partition(), &identity).await?;

        info!("Signed in identity {}", identity.id);
        self.session_for(identity)
    }

    /// Resolve a provider profile through the linker and mint a token for the result.
    pub async fn oauth_callback(
        &self,
        provider: OAuthProvider,
        profile: &ProviderProfile,
    ) -> AccountErrorResult<AuthSession> {
        let outcome = self.linker.link(provider, profile).await?;
        self.session_for(outcome.into_identity())
    }

    /// Verify a bearer token and resolve its subject.
    pub async fn authenticate(&self, token: &str) -> AccountErrorResult<Identity> {
        let id = match self.tokens.verify(token) {
            Ok(id) => id,
            Err(e) if e.is_verification_failure() => {
                warn!("Token rejected: {}", e);
                return Err(AccountError::unauthorized(e.error_code()));
            }
            Err(e) => return Err(e.into()),
        };

        self.resolver.resolve_by_id(id).await?.ok_or_else(|| {
            warn!("Token subject {} no longer exists", id);
            AccountError::unauthorized("identity not found")
        })
    }

    /// Alias of [`Self::authenticate`] named for the use case.
    pub async fn get_profile(&self, token: &str) -> AccountErrorResult<Identity> {
        self.authenticate(token).await
    }

    /// Apply a profile edit to an authenticated identity.
    ///
    /// A new email already held by a different identity, in any partition, is a `Conflict`.
    pub async fn update_profile(
        &self,
        mut identity: Identity,
        update: ProfileUpdate,
    ) -> AccountErrorResult<Identity> {
        if let Some(email) = update.email.as_deref().map(normalize_email)
            && email != identity.email
        {
            if let Some(other) = self.resolver.resolve_by_email(&email).await?
                && other.id != identity.id
            {
                return Err(AccountError::conflict("Email is already taken"));
            }
            identity.email = email;
        }

        if let Some(first_name) = update.first_name {
            identity.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            identity.last_name = last_name.trim().to_string();
        }

        identity.touch();
        self.save(&identity).await?;

        info!("Updated profile of identity {}", identity.id);
        Ok(identity)
    }

    /// Replace the password of an identity that has one.
    pub async fn change_password(
        &self,
        mut identity: Identity,
        current_password: &str,
        new_password: &str,
    ) -> AccountErrorResult<Identity> {
        let Some(digest) = identity.password_hash.as_deref() else {
            return Err(AccountError::invalid_credentials());
        };

        if !self.hasher.verify(current_password, digest)? {
            return Err(AccountError::invalid_credentials());
        }

        identity.password_hash = Some(self.hasher.hash(new_password)?);
        identity.touch();
        self.save(&identity).await?;

        info!("Changed password of identity {}", identity.id);
        Ok(identity)
    }

    /// Delete only the record in the partition the caller authenticated against.
    pub async fn delete_account(&self, identity: &Identity) -> AccountErrorResult<()> {
        match self.store.delete_by_id(identity.partition(), identity.id).await {
            Ok(()) => {
                info!(
                    "Deleted identity {} from {} partition",
                    identity.id,
                    identity.partition()
                );
                Ok(())
            }
            Err(DbError::NotFound { .. }) => Err(AccountError::not_found("User not found")),
            Err(e) => Err(e.into()),
        }
    }

    pub fn stats(&self, identity: &Identity) -> IdentityStats {
        IdentityStats::from(identity)
    }

    async fn save(&self, identity: &Identity) -> AccountErrorResult<()> {
        match self.store.save(identity.partition(), identity).await {
            Ok(()) => Ok(()),
            Err(DbError::DuplicateKey { .. }) => {
                Err(AccountError::conflict("Email is already taken"))
            }
            Err(DbError::NotFound { .. }) => Err(AccountError::not_found("User not found")),
            Err(e) => Err(e.into()),
        }
    }

    fn session_for(&self, identity: Identity) -> AccountErrorResult<AuthSession> {
        let token = self.tokens.issue(identity.id)?;
        Ok(AuthSession { identity, token })
    }
}
