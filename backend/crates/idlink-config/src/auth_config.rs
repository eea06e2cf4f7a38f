use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_LEEWAY_SECS, DEFAULT_TOKEN_TTL_SECS, MAX_LEEWAY_SECS,
    MAX_TOKEN_TTL_SECS, MIN_JWT_SECRET_LENGTH, MIN_TOKEN_TTL_SECS,
};

use serde::Deserialize;

/// Token signing and password hashing settings.
///
/// `jwt_secret` has no default; startup fails until one is configured.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: i64,
    /// Clock-skew tolerance applied to `exp`
    pub leeway_secs: u64,
    /// Argon2id memory cost
    pub hash_memory_kib: u32,
    /// Argon2id time cost
    pub hash_iterations: u32,
    /// Argon2id lanes
    pub hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            leeway_secs: DEFAULT_LEEWAY_SECS,
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            hash_parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set IDLINK_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_secs must be {}-{}, got {}",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, self.token_ttl_secs
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be <= {}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        if self.hash_iterations < 1 {
            return Err(ConfigError::auth("auth.hash_iterations must be >= 1"));
        }

        if self.hash_parallelism < 1 {
            return Err(ConfigError::auth("auth.hash_parallelism must be >= 1"));
        }

        if self.hash_memory_kib < 8 * self.hash_parallelism {
            return Err(ConfigError::auth(format!(
                "auth.hash_memory_kib must be >= 8 * hash_parallelism ({}), got {}",
                8 * self.hash_parallelism,
                self.hash_memory_kib
            )));
        }

        Ok(())
    }

    /// Signing secret bytes; empty until configured.
    pub fn secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_deref().unwrap_or_default().as_bytes()
    }
}
