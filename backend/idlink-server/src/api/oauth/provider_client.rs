//! Server-side half of the authorization-code flow: trade the `code` the
//! provider handed the browser for the user's profile.

use crate::api::oauth::oauth_client_error::OAuthClientError;

use idlink_config::OAuthProviderConfig;
use idlink_core::{OAuthProvider, ProviderProfile};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde::Deserialize;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

const USER_AGENT: &str = concat!("idlink/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait OAuthProviderClient: Send + Sync {
    /// Exchange an authorization code for the profile of the consenting user.
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        config: &OAuthProviderConfig,
        code: &str,
    ) -> Result<ProviderProfile, OAuthClientError>;
}

/// Talks to the real Google and GitHub endpoints.
pub struct HttpOAuthClient {
    http: reqwest::Client,
}

impl HttpOAuthClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http })
    }

    async fn access_token(
        &self,
        provider: OAuthProvider,
        config: &OAuthProviderConfig,
        code: &str,
    ) -> Result<String, OAuthClientError> {
        let token_url = match provider {
            OAuthProvider::Google => GOOGLE_TOKEN_URL,
            OAuthProvider::Github => GITHUB_TOKEN_URL,
        };

        // GitHub answers 200 with an `error` field for bad codes.
        let response: TokenResponse = self
            .http
            .post(token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| http_error(provider, e))?
            .json()
            .await
            .map_err(|e| http_error(provider, e))?;

        match response {
            TokenResponse {
                access_token: Some(token),
                ..
            } if !token.is_empty() => Ok(token),
            TokenResponse { error, .. } => Err(rejected(
                provider,
                error.unwrap_or_else(|| "no access_token in token response".to_string()),
            )),
        }
    }

    async fn google_profile(&self, access_token: &str) -> Result<ProviderProfile, OAuthClientError> {
        let provider = OAuthProvider::Google;
        let user: GoogleUserInfo = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| http_error(provider, e))?
            .json()
            .await
            .map_err(|e| http_error(provider, e))?;

        Ok(ProviderProfile {
            external_id: user.sub,
            // An unverified Google address must not link to another partition's record.
            email: user.email.filter(|_| user.email_verified.unwrap_or(false)),
            display_name: user.name,
            given_name: user.given_name,
            family_name: user.family_name,
            username: None,
            avatar_url: user.picture,
        })
    }

    async fn github_profile(&self, access_token: &str) -> Result<ProviderProfile, OAuthClientError> {
        let provider = OAuthProvider::Github;
        let user: GithubUser = self
            .http
            .get(GITHUB_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| http_error(provider, e))?
            .json()
            .await
            .map_err(|e| http_error(provider, e))?;

        let email = match user.email {
            Some(email) => Some(email),
            None => self.github_primary_email(access_token).await,
        };

        Ok(ProviderProfile {
            external_id: user.id.to_string(),
            email,
            display_name: user.name,
            given_name: None,
            family_name: None,
            username: Some(user.login),
            avatar_url: user.avatar_url,
        })
    }

    /// Primary verified address; `None` when hidden or unavailable.
    async fn github_primary_email(&self, access_token: &str) -> Option<String> {
        let emails: Vec<GithubEmail> = match self
            .http
            .get(GITHUB_EMAILS_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
        {
            Ok(response) => response.json().await.ok()?,
            Err(e) => {
                log::warn!("Could not fetch GitHub emails: {}", e);
                return None;
            }
        };

        emails
            .into_iter()
            .find(|e| e.primary && e.verified)
            .map(|e| e.email)
    }
}

#[async_trait]
impl OAuthProviderClient for HttpOAuthClient {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        config: &OAuthProviderConfig,
        code: &str,
    ) -> Result<ProviderProfile, OAuthClientError> {
        let access_token = self.access_token(provider, config, code).await?;

        match provider {
            OAuthProvider::Google => self.google_profile(&access_token).await,
            OAuthProvider::Github => self.github_profile(&access_token).await,
        }
    }
}

#[track_caller]
fn http_error(provider: OAuthProvider, source: reqwest::Error) -> OAuthClientError {
    OAuthClientError::Http {
        provider,
        source,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn rejected(provider: OAuthProvider, message: String) -> OAuthClientError {
    OAuthClientError::Rejected {
        provider,
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: u64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}
