pub mod email;
pub mod error;
pub mod models;

pub use email::normalize_email;
pub use error::{CoreError, Result};
pub use models::identity::Identity;
pub use models::login_method::LoginMethod;
pub use models::oauth_provider::OAuthProvider;
pub use models::provider_profile::ProviderProfile;

/// Upper bound for first and last names, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

#[cfg(test)]
mod tests;
