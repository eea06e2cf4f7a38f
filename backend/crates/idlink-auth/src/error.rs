use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid hashing parameters: {message} {location}")]
    HashParameters {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    TokenMalformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signature invalid {location}")]
    SignatureInvalid { location: ErrorLocation },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Hashing { .. } => "HASHING_FAILED",
            Self::HashParameters { .. } => "INVALID_HASH_PARAMETERS",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::TokenMalformed { .. } => "TOKEN_MALFORMED",
            Self::SignatureInvalid { .. } => "SIGNATURE_INVALID",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
        }
    }

    /// True for failures a caller's bearer token can cause, as opposed to
    /// infrastructure failures on our side.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired { .. }
                | Self::TokenMalformed { .. }
                | Self::SignatureInvalid { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
