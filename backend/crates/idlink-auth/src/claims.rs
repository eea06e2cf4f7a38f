use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity id)
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Unique token id; keeps two tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    /// Validate the subject after signature verification and return it as an identity id.
    #[track_caller]
    pub fn subject(&self) -> AuthErrorResult<Uuid> {
        if self.sub.is_empty() {
            return Err(AuthError::TokenMalformed {
                message: "sub (identity id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Uuid::parse_str(&self.sub).map_err(|e| AuthError::TokenMalformed {
            message: format!("sub is not a valid identity id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
