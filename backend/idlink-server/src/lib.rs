pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{logout, me, signin, signup},
        auth_data::AuthData,
        signin_request::SigninRequest,
        signup_request::SignupRequest,
    },
    envelope::ApiResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::authenticated_identity::AuthenticatedIdentity,
    identity_dto::{IdentityDto, UserData},
    oauth::{
        callback_query::OAuthCallbackQuery,
        oauth_client_error::OAuthClientError,
        provider_client::{HttpOAuthClient, OAuthProviderClient},
    },
    user::{
        change_password_request::ChangePasswordRequest,
        stats_data::StatsData,
        update_profile_request::UpdateProfileRequest,
        user::{change_password, delete_account, get_profile, stats, update_profile},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
