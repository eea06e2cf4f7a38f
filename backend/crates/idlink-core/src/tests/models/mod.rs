mod identity;
mod login_method;
mod oauth_provider;
mod provider_profile;
