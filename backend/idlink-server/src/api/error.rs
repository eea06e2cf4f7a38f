//! REST API error types
//!
//! Every failure renders as
//! `{ "success": false, "message", "error": { "code", "message", "field"? } }`.
//! Infrastructure detail is logged here and never sent to the client.

use crate::api::oauth::oauth_client_error::OAuthClientError;

use idlink_accounts::AccountError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "INVALID_CREDENTIALS", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Offending request field for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-bounds request input (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Email already registered (400)
    #[error("Already exists: {message} {location}")]
    AlreadyExists {
        message: String,
        location: ErrorLocation,
    },

    /// Profile edit collides with another identity (400)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Any signin failure, deliberately undifferentiated (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Missing, invalid or expired bearer token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Provider profile lacks required fields (401)
    #[error("Profile incomplete: {message} {location}")]
    ProfileIncomplete {
        message: String,
        location: ErrorLocation,
    },

    /// Unknown route resource or record (404)
    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500); `message` is logged only
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
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

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::AlreadyExists { .. } | Self::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials { .. }
            | Self::Unauthorized { .. }
            | Self::ProfileIncomplete { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let status = self.status_code();
        let body = match self {
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::AlreadyExists { message, .. } => ApiErrorBody {
                code: "ALREADY_EXISTS".into(),
                message,
                field: None,
            },
            ApiError::Conflict { message, .. } => ApiErrorBody {
                code: "CONFLICT".into(),
                message,
                field: None,
            },
            ApiError::InvalidCredentials { .. } => ApiErrorBody {
                code: "INVALID_CREDENTIALS".into(),
                message: "Invalid email or password".into(),
                field: None,
            },
            ApiError::Unauthorized { message, .. } => ApiErrorBody {
                code: "UNAUTHORIZED".into(),
                message,
                field: None,
            },
            ApiError::ProfileIncomplete { .. } => ApiErrorBody {
                code: "PROFILE_INCOMPLETE".into(),
                message: "OAuth authentication failed".into(),
                field: None,
            },
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Internal { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: INTERNAL_MESSAGE.into(),
                field: None,
            },
        };

        let response = ApiErrorResponse {
            success: false,
            message: body.message.clone(),
            error: body,
        };

        (status, Json(response)).into_response()
    }
}

/// Domain errors keep their user-facing message; infrastructure errors become `Internal`.
impl From<AccountError> for ApiError {
    #[track_caller]
    fn from(e: AccountError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            AccountError::AlreadyExists { message, .. } => {
                ApiError::AlreadyExists { message, location }
            }
            AccountError::InvalidCredentials { .. } => ApiError::InvalidCredentials { location },
            AccountError::NotFound { message, .. } => ApiError::NotFound { message, location },
            AccountError::Conflict { message, .. } => ApiError::Conflict { message, location },
            AccountError::ProfileIncomplete { message, .. } => {
                ApiError::ProfileIncomplete { message, location }
            }
            AccountError::Unauthorized { reason, .. } => {
                log::warn!("Rejected bearer token: {}", reason);
                ApiError::Unauthorized {
                    message: "Invalid token".into(),
                    location,
                }
            }
            e @ (AccountError::Store { .. } | AccountError::Credential { .. }) => {
                ApiError::Internal {
                    message: e.to_string(),
                    location,
                }
            }
        }
    }
}

/// A failed code exchange is an authentication failure for the caller.
impl From<OAuthClientError> for ApiError {
    #[track_caller]
    fn from(e: OAuthClientError) -> Self {
        ApiError::Unauthorized {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Unparseable JSON bodies are validation failures, not axum's plain-text 4xx.
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid request body: {}", rejection.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
