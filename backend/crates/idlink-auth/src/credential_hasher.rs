//! Password hashing using Argon2id.
//!
//! Every digest is PHC-formatted (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`),
//! so the salt and work factor travel with it and verification works even
//! after the configured parameters change. Digest comparison inside
//! `argon2` is constant-time.
//!
//! Each hasher also keeps a digest of a fixed throwaway password. Callers that
//! reject a credential without a stored digest verify against it instead, so
//! every rejection costs one full Argon2 run.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;

const DUMMY_PASSWORD: &str = "idlink-dummy-credential";

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
    dummy_digest: String,
}

impl CredentialHasher {
    /// Build a hasher with an explicit work factor.
    #[track_caller]
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> AuthErrorResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            AuthError::HashParameters {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let mut hasher = Self {
            params,
            dummy_digest: String::new(),
        };
        hasher.dummy_digest = hasher.hash(DUMMY_PASSWORD)?;

        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let digest = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing {
                message: format!("Failed to hash password: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(digest.to_string())
    }

    /// Check a password against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    #[track_caller]
    pub fn verify(&self, plaintext: &str, digest: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|e| AuthError::Hashing {
            message: format!("Failed to parse password hash: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Hashing {
                message: format!("Failed to verify password: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Spend one verification on the throwaway digest and report a mismatch.
    ///
    /// For rejection paths that have no stored digest to check (unknown
    /// email, password-less identity).
    #[track_caller]
    pub fn verify_against_dummy(&self, plaintext: &str) -> AuthErrorResult<bool> {
        self.verify(plaintext, &self.dummy_digest).map(|_| false)
    }
}
