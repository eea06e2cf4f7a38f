//! OAuth start/callback handlers
//!
//! `start` sends the browser to the provider with a signed `state`. The
//! provider sends it back to `callback` with `code` and `state`; the code is
//! exchanged server-side, the profile is linked to an identity, and the
//! browser lands on the frontend with a bearer token.

use crate::api::oauth::callback_query::OAuthCallbackQuery;
use crate::{ApiError, ApiResult, AppState};

use idlink_accounts::AuthSession;
use idlink_config::OAuthProviderConfig;
use idlink_core::OAuthProvider;

use std::panic::Location;
use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use error_location::ErrorLocation;
use reqwest::Url;

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

fn authorize_endpoint(provider: OAuthProvider) -> &'static str {
    match provider {
        OAuthProvider::Google => GOOGLE_AUTHORIZE_URL,
        OAuthProvider::Github => GITHUB_AUTHORIZE_URL,
    }
}

fn scope(provider: OAuthProvider) -> &'static str {
    match provider {
        OAuthProvider::Google => "profile email",
        OAuthProvider::Github => "user:email",
    }
}

/// Known and configured provider, else 404.
fn configured_provider(
    state: &AppState,
    name: &str,
) -> ApiResult<(OAuthProvider, OAuthProviderConfig)> {
    let provider = OAuthProvider::from_str(name)
        .map_err(|_| ApiError::not_found(format!("Unknown OAuth provider: {}", name)))?;

    let config = match provider {
        OAuthProvider::Google => state.oauth.google.clone(),
        OAuthProvider::Github => state.oauth.github.clone(),
    };

    config
        .map(|c| (provider, c))
        .ok_or_else(|| ApiError::not_found(format!("OAuth provider {} is not configured", name)))
}

/// Provider consent URL for the given `state` value.
pub fn authorization_url(
    provider: OAuthProvider,
    config: &OAuthProviderConfig,
    state: &str,
) -> ApiResult<Url> {
    Url::parse_with_params(
        authorize_endpoint(provider),
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", scope(provider)),
            ("state", state),
        ],
    )
    .map_err(|e| ApiError::Internal {
        message: format!("Failed to build {} authorization URL: {}", provider, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// `{frontend_url}/auth/callback?token=..&provider=..`
pub fn frontend_redirect_url(
    frontend_url: &str,
    token: &str,
    provider: OAuthProvider,
) -> ApiResult<Url> {
    let mut url = frontend_url_for(frontend_url, "auth/callback")?;

    url.query_pairs_mut()
        .append_pair("token", token)
        .append_pair("provider", provider.as_str());

    Ok(url)
}

/// `{frontend_url}/auth/error?message=..&provider=..`; never carries failure detail.
pub fn frontend_error_url(frontend_url: &str, provider: OAuthProvider) -> ApiResult<Url> {
    let mut url = frontend_url_for(frontend_url, "auth/error")?;

    url.query_pairs_mut()
        .append_pair("message", "OAuth authentication failed")
        .append_pair("provider", provider.as_str());

    Ok(url)
}

fn frontend_url_for(frontend_url: &str, path: &str) -> ApiResult<Url> {
    Url::parse(&format!("{}/{}", frontend_url.trim_end_matches('/'), path)).map_err(|e| {
        ApiError::Internal {
            message: format!("Invalid frontend URL {}: {}", frontend_url, e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}

/// GET /api/auth/{provider}/start
pub async fn start(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Redirect> {
    let (provider, config) = configured_provider(&state, &provider)?;

    let flow_state = state
        .tokens
        .issue_state(provider.as_str())
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let url = authorization_url(provider, &config, &flow_state)?;
    log::info!("Starting {} OAuth flow", provider);

    Ok(Redirect::to(url.as_str()))
}

/// GET /api/auth/{provider}/callback?code=..&state=..
///
/// Always answers with a redirect to the frontend once the provider is known:
/// the token on success, a generic error page otherwise.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<Redirect> {
    let (provider, config) = configured_provider(&state, &provider)?;
    let frontend_url = &state.oauth.frontend_url;

    match complete_flow(&state, provider, &config, query).await {
        Ok(session) => {
            log::info!(
                "{} authentication successful for identity {}",
                provider,
                session.identity.id
            );
            let url = frontend_redirect_url(frontend_url, &session.token, provider)?;
            Ok(Redirect::to(url.as_str()))
        }
        Err(e) => {
            log::warn!("{} OAuth callback failed: {}", provider, e);
            let url = frontend_error_url(frontend_url, provider)?;
            Ok(Redirect::to(url.as_str()))
        }
    }
}

async fn complete_flow(
    state: &AppState,
    provider: OAuthProvider,
    config: &OAuthProviderConfig,
    query: OAuthCallbackQuery,
) -> ApiResult<AuthSession> {
    if let Some(error) = query.error {
        return Err(ApiError::unauthorized(format!(
            "provider returned error: {}",
            error
        )));
    }

    let flow_state = query
        .state
        .ok_or_else(|| ApiError::unauthorized("missing state"))?;
    state
        .tokens
        .verify_state(&flow_state, provider.as_str())
        .map_err(|e| ApiError::unauthorized(format!("invalid state: {}", e)))?;

    let code = query
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::unauthorized("missing authorization code"))?;

    let profile = state
        .oauth_client
        .exchange_code(provider, config, &code)
        .await?;

    Ok(state.accounts.oauth_callback(provider, &profile).await?)
}
