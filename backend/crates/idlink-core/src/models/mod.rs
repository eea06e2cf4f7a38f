pub mod identity;
pub mod login_method;
pub mod oauth_provider;
pub mod provider_profile;
