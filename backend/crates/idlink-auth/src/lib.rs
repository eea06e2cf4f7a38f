pub mod claims;
pub mod credential_hasher;
pub mod error;
pub mod state_claims;
pub mod token_service;

pub use claims::Claims;
pub use credential_hasher::CredentialHasher;
pub use error::{AuthError, Result};
pub use state_claims::StateClaims;
pub use token_service::{STATE_TTL_SECS, TokenService};

#[cfg(test)]
mod tests;
