//! Account linking for OAuth assertions.
//!
//! A provider assertion resolves in three steps: a returning external id,
//! then a same-email record in another partition (linked by creating a new
//! record that copies its name), then a brand new record. Records are never
//! merged; linked records stay independently addressable.
//!
//! An email already held in the asserting provider's partition by a different
//! external id is `AlreadyExists`, whether the pre-check sees it or a
//! concurrent insert trips the partition's unique index first.

use crate::{AccountError, IdentityResolver, Result as AccountErrorResult};

use idlink_core::{Identity, OAuthProvider, ProviderProfile};
use idlink_db::{DbError, IdentityStore};

use std::sync::Arc;

use log::info;
use uuid::Uuid;

/// How an assertion was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The provider id was already known
    Returning(Identity),
    /// A new provider record sharing its email with `linked_to`
    Linked { identity: Identity, linked_to: Uuid },
    /// No record shared the provider id or the email
    Created(Identity),
}

impl LinkOutcome {
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Returning(identity) | Self::Created(identity) => identity,
            Self::Linked { identity, .. } => identity,
        }
    }

    pub fn into_identity(self) -> Identity {
        match self {
            Self::Returning(identity) | Self::Created(identity) => identity,
            Self::Linked { identity, .. } => identity,
        }
    }
}

#[derive(Clone)]
pub struct AccountLinker {
    store: Arc<dyn IdentityStore>,
    resolver: IdentityResolver,
}

impl AccountLinker {
    pub fn new(store: Arc<dyn IdentityStore>, resolver: IdentityResolver) -> Self {
        Self { store, resolver }
    }

    /// Resolve a provider profile to an identity in the provider's partition.
    ///
    /// Every path leaves the returned record with `last_login_at` set to now.
    pub async fn link(
        &self,
        provider: OAuthProvider,
        profile: &ProviderProfile,
    ) -> AccountErrorResult<LinkOutcome> {
        let partition = provider.partition();
        let external_id = profile.external_id().ok_or_else(|| {
            AccountError::profile_incomplete(format!("{} profile has no external id", provider))
        })?;

        if let Some(mut identity) = self
            .resolver
            .resolve_by_external_id(provider, external_id)
            .await?
        {
            identity.record_login();
            self.store.save(partition, &identity).await?;
            info!("Returning {} identity {}", provider, identity.id);
            return Ok(LinkOutcome::Returning(identity));
        }

        let Some(email) = profile.email() else {
            let identity = self.create_without_email(provider, external_id, profile).await?;
            return Ok(LinkOutcome::Created(identity));
        };

        if self.store.find_by_email(partition, &email).await?.is_some() {
            info!(
                "{} assertion {} rejected: {} already held by another {} id",
                provider, external_id, email, provider
            );
            return Err(already_linked(provider));
        }

        if let Some(existing) = self.resolver.resolve_by_email(&email).await? {
            let mut identity = Identity::new_from_provider(
                provider,
                external_id.to_string(),
                email,
                existing.first_name.clone(),
                existing.last_name.clone(),
            );
            identity.avatar_url = profile.avatar_url();

            self.create(provider, &identity).await?;
            info!(
                "Linked new {} identity {} to {} identity {} by shared email",
                provider,
                identity.id,
                existing.partition(),
                existing.id
            );
            return Ok(LinkOutcome::Linked {
                identity,
                linked_to: existing.id,
            });
        }

        let (first_name, last_name) = name_parts(provider, profile)?;
        let mut identity = Identity::new_from_provider(
            provider,
            external_id.to_string(),
            email,
            first_name,
            last_name,
        );
        identity.avatar_url = profile.avatar_url();

        self.create(provider, &identity).await?;
        info!("Created {} identity {}", provider, identity.id);
        Ok(LinkOutcome::Created(identity))
    }

    async fn create_without_email(
        &self,
        provider: OAuthProvider,
        external_id: &str,
        profile: &ProviderProfile,
    ) -> AccountErrorResult<Identity> {
        let email = profile.placeholder_email(provider).ok_or_else(|| {
            AccountError::profile_incomplete(format!(
                "{} profile has neither an email nor a username",
                provider
            ))
        })?;
        let (first_name, last_name) = name_parts(provider, profile)?;

        let mut identity = Identity::new_from_provider(
            provider,
            external_id.to_string(),
            email,
            first_name,
            last_name,
        );
        identity.email_verified = false;
        identity.avatar_url = profile.avatar_url();

        self.create(provider, &identity).await?;
        info!(
            "Created {} identity {} with placeholder email {}",
            provider, identity.id, identity.email
        );
        Ok(identity)
    }

    /// A unique-index race with a concurrent assertion surfaces as `AlreadyExists`.
    async fn create(&self, provider: OAuthProvider, identity: &Identity) -> AccountErrorResult<()> {
        match self.store.create(provider.partition(), identity).await {
            Ok(()) => Ok(()),
            Err(DbError::DuplicateKey { message, .. }) => {
                info!(
                    "{} identity {} lost a create race: {}",
                    provider, identity.id, message
                );
                Err(already_linked(provider))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[track_caller]
fn already_linked(provider: OAuthProvider) -> AccountError {
    AccountError::already_exists(format!(
        "Email is already linked to another {} account",
        provider
    ))
}

fn name_parts(
    provider: OAuthProvider,
    profile: &ProviderProfile,
) -> AccountErrorResult<(String, String)> {
    profile.name_parts().ok_or_else(|| {
        AccountError::profile_incomplete(format!("{} profile has no usable name", provider))
    })
}
