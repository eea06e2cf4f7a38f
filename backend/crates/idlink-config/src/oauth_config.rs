use crate::{ConfigError, ConfigErrorResult, DEFAULT_FRONTEND_URL};

use serde::Deserialize;

/// Client registration for one provider.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    /// Used only for the server-side code exchange
    pub client_secret: String,
    /// Where the provider sends the user back after consent
    pub redirect_url: String,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

impl OAuthProviderConfig {
    fn validate(&self, name: &str) -> ConfigErrorResult<()> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::oauth(format!(
                "oauth.{}.client_id cannot be empty",
                name
            )));
        }

        if self.client_secret.trim().is_empty() {
            return Err(ConfigError::oauth(format!(
                "oauth.{name}.client_secret cannot be empty (set IDLINK_OAUTH_{}_CLIENT_SECRET)",
                name.to_uppercase()
            )));
        }

        if !is_http_url(&self.redirect_url) {
            return Err(ConfigError::oauth(format!(
                "oauth.{}.redirect_url must be an http(s) URL, got '{}'",
                name, self.redirect_url
            )));
        }

        Ok(())
    }
}

/// A provider without a block is disabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Base URL the callback hands the browser back to
    pub frontend_url: String,
    pub google: Option<OAuthProviderConfig>,
    pub github: Option<OAuthProviderConfig>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            frontend_url: String::from(DEFAULT_FRONTEND_URL),
            google: None,
            github: None,
        }
    }
}

impl OAuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.frontend_url) {
            return Err(ConfigError::oauth(format!(
                "oauth.frontend_url must be an http(s) URL, got '{}'",
                self.frontend_url
            )));
        }

        if let Some(google) = &self.google {
            google.validate("google")?;
        }
        if let Some(github) = &self.github {
            github.validate("github")?;
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
