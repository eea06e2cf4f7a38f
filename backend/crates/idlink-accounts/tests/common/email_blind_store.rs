use idlink_core::{Identity, LoginMethod};
use idlink_db::{IdentityRepository, IdentityStore, Result as DbErrorResult};

use async_trait::async_trait;
use uuid::Uuid;

/// Store whose email lookups always miss, as if another writer created the
/// record between the existence check and the insert.
pub struct EmailBlindStore {
    inner: IdentityRepository,
}

impl EmailBlindStore {
    pub fn new(inner: IdentityRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl IdentityStore for EmailBlindStore {
    async fn find_by_email(
        &self,
        _partition: LoginMethod,
        _email: &str,
    ) -> DbErrorResult<Option<Identity>> {
        Ok(None)
    }

    async fn find_by_external_id(
        &self,
        partition: LoginMethod,
        external_id: &str,
    ) -> DbErrorResult<Option<Identity>> {
        self.inner.find_by_external_id(partition, external_id).await
    }

    async fn find_by_id(
        &self,
        partition: LoginMethod,
        id: Uuid,
    ) -> DbErrorResult<Option<Identity>> {
        self.inner.find_by_id(partition, id).await
    }

    async fn create(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()> {
        self.inner.create(partition, identity).await
    }

    async fn save(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()> {
        self.inner.save(partition, identity).await
    }

    async fn delete_by_id(&self, partition: LoginMethod, id: Uuid) -> DbErrorResult<()> {
        self.inner.delete_by_id(partition, id).await
    }
}
