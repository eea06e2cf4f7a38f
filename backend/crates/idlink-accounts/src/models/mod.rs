pub mod auth_session;
pub mod identity_stats;
pub mod profile_update;
pub mod signup_request;
