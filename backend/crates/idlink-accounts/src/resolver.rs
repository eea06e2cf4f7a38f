//! Partition-aware identity lookup.
//!
//! Callers never query a unified user table. A "does this identity exist"
//! question is answered by scanning the partitions in
//! [`LoginMethod::SCAN_ORDER`] and returning the first hit, so when the same
//! email lives in several partitions the email-partition record wins, then
//! google, then github.

use crate::Result as AccountErrorResult;

use idlink_core::{Identity, LoginMethod, OAuthProvider, normalize_email};
use idlink_db::IdentityStore;

use std::sync::Arc;

use uuid::Uuid;

#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// First record holding `email` across all partitions.
    pub async fn resolve_by_email(&self, email: &str) -> AccountErrorResult<Option<Identity>> {
        let email = normalize_email(email);

        for partition in LoginMethod::SCAN_ORDER {
            if let Some(identity) = self.store.find_by_email(partition, &email).await? {
                return Ok(Some(identity));
            }
        }

        Ok(None)
    }

    /// Same ordered scan by primary key; used for token subjects.
    pub async fn resolve_by_id(&self, id: Uuid) -> AccountErrorResult<Option<Identity>> {
        for partition in LoginMethod::SCAN_ORDER {
            if let Some(identity) = self.store.find_by_id(partition, id).await? {
                return Ok(Some(identity));
            }
        }

        Ok(None)
    }

    /// Lookup confined to the provider's own partition.
    pub async fn resolve_by_external_id(
        &self,
        provider: OAuthProvider,
        external_id: &str,
    ) -> AccountErrorResult<Option<Identity>> {
        Ok(self
            .store
            .find_by_external_id(provider.partition(), external_id)
            .await?)
    }
}
