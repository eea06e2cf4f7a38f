use idlink_auth::AuthError;
use idlink_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account already exists: {message} {location}")]
    AlreadyExists {
        message: String,
        location: ErrorLocation,
    },

    /// Deliberately carries no detail so every signin failure looks the same
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider profile incomplete: {message} {location}")]
    ProfileIncomplete {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {reason} {location}")]
    Unauthorized {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Identity store error: {source} {location}")]
    Store {
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Credential error: {source} {location}")]
    Credential {
        source: AuthError,
        location: ErrorLocation,
    },
}

impl AccountError {
    #[track_caller]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_incomplete(message: impl Into<String>) -> Self {
        Self::ProfileIncomplete {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Store and credential-infrastructure failures; never shown to callers in detail.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Credential { .. })
    }
}

impl From<DbError> for AccountError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for AccountError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Credential {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
