use crate::{CoreError, LoginMethod, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// External identity providers that can assert a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
        }
    }

    /// Partition that holds records created from this provider's assertions.
    pub fn partition(&self) -> LoginMethod {
        match self {
            Self::Google => LoginMethod::Google,
            Self::Github => LoginMethod::Github,
        }
    }

    /// Domain used to synthesize an address when the profile carries none.
    pub fn placeholder_domain(&self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::Github => "github.com",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "google" => Ok(Self::Google),
            "github" => Ok(Self::Github),
            _ => Err(CoreError::InvalidProvider {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
