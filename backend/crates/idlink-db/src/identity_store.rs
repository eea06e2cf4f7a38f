//! Identity Store Adapter contract.
//!
//! A narrow CRUD facade over the three partitions. It holds no linking logic;
//! the resolver and linker compose it.

use crate::Result as DbErrorResult;

use idlink_core::{Identity, LoginMethod};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(
        &self,
        partition: LoginMethod,
        email: &str,
    ) -> DbErrorResult<Option<Identity>>;

    async fn find_by_external_id(
        &self,
        partition: LoginMethod,
        external_id: &str,
    ) -> DbErrorResult<Option<Identity>>;

    async fn find_by_id(&self, partition: LoginMethod, id: Uuid)
    -> DbErrorResult<Option<Identity>>;

    /// Fails with `DbError::DuplicateKey` when the partition already holds the
    /// email or external id.
    async fn create(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()>;

    /// Fails with `DbError::NotFound` when no record with this id exists in the partition.
    async fn save(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()>;

    /// Fails with `DbError::NotFound` when no record with this id exists in the partition.
    async fn delete_by_id(&self, partition: LoginMethod, id: Uuid) -> DbErrorResult<()>;
}
