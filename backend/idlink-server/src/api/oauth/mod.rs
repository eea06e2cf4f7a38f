pub mod callback_query;
pub mod oauth;
pub mod oauth_client_error;
pub mod provider_client;
