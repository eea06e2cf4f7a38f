//! SQLite-backed identity store.
//!
//! All partitions live in the `identities` table keyed by the `partition`
//! column. Uniqueness of email and external id per partition is enforced by
//! unique indexes, so concurrent creators racing the same key get
//! `DbError::DuplicateKey` instead of an application-level lock.

use crate::{DbError, IdentityStore, Result as DbErrorResult};

use idlink_core::{Identity, LoginMethod};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, partition, email, password_hash, first_name, last_name,
        external_id, avatar_url, email_verified, created_at, updated_at, last_login_at
    FROM identities
"#;

#[derive(Debug, sqlx::FromRow)]
struct IdentityRow {
    id: String,
    partition: String,
    email: String,
    password_hash: Option<String>,
    first_name: String,
    last_name: String,
    external_id: Option<String>,
    avatar_url: Option<String>,
    email_verified: bool,
    created_at: i64,
    updated_at: i64,
    last_login_at: i64,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = DbError;

    #[track_caller]
    fn try_from(r: IdentityRow) -> DbErrorResult<Self> {
        Ok(Identity {
            id: Uuid::parse_str(&r.id).map_err(|e| DbError::CorruptRow {
                message: format!("Invalid UUID in identities.id: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
            login_method: LoginMethod::from_str(&r.partition).map_err(|e| {
                DbError::CorruptRow {
                    message: format!("Invalid partition in identities.partition: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?,
            email: r.email,
            password_hash: r.password_hash,
            first_name: r.first_name,
            last_name: r.last_name,
            external_id: r.external_id,
            avatar_url: r.avatar_url,
            email_verified: r.email_verified,
            created_at: from_millis(r.created_at, "created_at")?,
            updated_at: from_millis(r.updated_at, "updated_at")?,
            last_login_at: from_millis(r.last_login_at, "last_login_at")?,
        })
    }
}

#[track_caller]
fn from_millis(value: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| DbError::CorruptRow {
        message: format!("Invalid timestamp in identities.{}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Unique-index violations become `DuplicateKey`; everything else stays a SQLx error.
#[track_caller]
fn map_write_error(partition: LoginMethod, e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbError::DuplicateKey {
            partition: partition.to_string(),
            message: db_err.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        },
        _ => DbError::Sqlx {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        },
    }
}

#[track_caller]
fn ensure_partition(partition: LoginMethod, identity: &Identity) -> DbErrorResult<()> {
    if identity.partition() != partition {
        return Err(DbError::PartitionMismatch {
            expected: partition.to_string(),
            actual: identity.partition().to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        partition: LoginMethod,
        column: &str,
        value: &str,
    ) -> DbErrorResult<Option<Identity>> {
        let sql = format!("{SELECT_COLUMNS} WHERE partition = ? AND {column} = ?");

        let row = sqlx::query_as::<_, IdentityRow>(&sql)
            .bind(partition.as_str())
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Identity::try_from).transpose()
    }

    /// Number of records in a partition.
    pub async fn count(&self, partition: LoginMethod) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM identities WHERE partition = ?")
            .bind(partition.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl IdentityStore for IdentityRepository {
    async fn find_by_email(
        &self,
        partition: LoginMethod,
        email: &str,
    ) -> DbErrorResult<Option<Identity>> {
        self.fetch_one_where(partition, "email", email).await
    }

    async fn find_by_external_id(
        &self,
        partition: LoginMethod,
        external_id: &str,
    ) -> DbErrorResult<Option<Identity>> {
        self.fetch_one_where(partition, "external_id", external_id)
            .await
    }

    async fn find_by_id(
        &self,
        partition: LoginMethod,
        id: Uuid,
    ) -> DbErrorResult<Option<Identity>> {
        self.fetch_one_where(partition, "id", &id.to_string()).await
    }

    async fn create(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()> {
        ensure_partition(partition, identity)?;

        sqlx::query(
            r#"
                INSERT INTO identities (
                    id, partition, email, password_hash, first_name, last_name,
                    external_id, avatar_url, email_verified,
                    created_at, updated_at, last_login_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(identity.id.to_string())
        .bind(partition.as_str())
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(&identity.external_id)
        .bind(&identity.avatar_url)
        .bind(identity.email_verified)
        .bind(identity.created_at.timestamp_millis())
        .bind(identity.updated_at.timestamp_millis())
        .bind(identity.last_login_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(partition, e))?;

        Ok(())
    }

    async fn save(&self, partition: LoginMethod, identity: &Identity) -> DbErrorResult<()> {
        ensure_partition(partition, identity)?;

        let result = sqlx::query(
            r#"
                UPDATE identities
                SET email = ?, password_hash = ?, first_name = ?, last_name = ?,
                    avatar_url = ?, email_verified = ?, updated_at = ?, last_login_at = ?
                WHERE id = ? AND partition = ?
            "#,
        )
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(&identity.avatar_url)
        .bind(identity.email_verified)
        .bind(identity.updated_at.timestamp_millis())
        .bind(identity.last_login_at.timestamp_millis())
        .bind(identity.id.to_string())
        .bind(partition.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(partition, e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                partition: partition.to_string(),
                id: identity.id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    async fn delete_by_id(&self, partition: LoginMethod, id: Uuid) -> DbErrorResult<()> {
        let result = sqlx::query("DELETE FROM identities WHERE id = ? AND partition = ?")
            .bind(id.to_string())
            .bind(partition.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                partition: partition.to_string(),
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
