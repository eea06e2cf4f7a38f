use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    /// A per-partition uniqueness constraint (email or external id) was violated
    #[error("Duplicate key in {partition} partition: {message} {location}")]
    DuplicateKey {
        partition: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity {id} not found in {partition} partition {location}")]
    NotFound {
        partition: String,
        id: String,
        location: ErrorLocation,
    },

    #[error("Record belongs to {actual} partition, not {expected} {location}")]
    PartitionMismatch {
        expected: String,
        actual: String,
        location: ErrorLocation,
    },

    #[error("Corrupt identity row: {message} {location}")]
    CorruptRow {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
