use crate::{AuthError, Claims, Result as AuthErrorResult, StateClaims};

use std::panic::Location;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Lifetime of an OAuth `state` value; covers one trip through the consent screen.
pub const STATE_TTL_SECS: i64 = 600;

/// Issues and verifies stateless HS256 bearer tokens.
///
/// There is no revocation store: a token stays valid until `exp`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    state_validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a service with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8], ttl_secs: i64, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let mut state_validation = Validation::new(Algorithm::HS256);
        state_validation.validate_exp = true;
        state_validation.leeway = leeway_secs;
        state_validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            state_validation,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a token for `identity_id`, valid from now.
    #[track_caller]
    pub fn issue(&self, identity_id: Uuid) -> AuthErrorResult<String> {
        self.issue_at(identity_id, Utc::now())
    }

    /// Issue a token as if minted at `issued_at`.
    #[track_caller]
    pub fn issue_at(&self, identity_id: Uuid, issued_at: DateTime<Utc>) -> AuthErrorResult<String> {
        let claims = Claims {
            sub: identity_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify signature and expiry and return the full claims.
    #[track_caller]
    pub fn decode(&self, token: &str) -> AuthErrorResult<Claims> {
        let claims: Claims = self.decode_with(token, &self.validation)?;

        // `iat` is not among the claims jsonwebtoken checks itself.
        if claims.iat > claims.exp {
            return Err(AuthError::TokenMalformed {
                message: "iat is after exp".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }

    /// Verify a token and return the identity id it asserts.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Uuid> {
        self.decode(token)?.subject()
    }

    /// Signed, short-lived `state` for an OAuth flow started for `provider`.
    #[track_caller]
    pub fn issue_state(&self, provider: &str) -> AuthErrorResult<String> {
        let now = Utc::now();
        let claims = StateClaims {
            provider: provider.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(STATE_TTL_SECS)).timestamp(),
            nonce: Uuid::new_v4().simple().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Accept a `state` only if we signed it, it is unexpired, and it was
    /// issued for `provider`.
    #[track_caller]
    pub fn verify_state(&self, state: &str, provider: &str) -> AuthErrorResult<StateClaims> {
        let claims: StateClaims = self.decode_with(state, &self.state_validation)?;

        if claims.provider != provider {
            return Err(AuthError::TokenMalformed {
                message: format!(
                    "state was issued for {}, not {}",
                    claims.provider, provider
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }

    #[track_caller]
    fn decode_with<T: DeserializeOwned + Clone>(
        &self,
        token: &str,
        validation: &Validation,
    ) -> AuthErrorResult<T> {
        let token_data = decode::<T>(token, &self.decoding_key, validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::TokenMalformed {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            }
        })?;

        Ok(token_data.claims)
    }
}
