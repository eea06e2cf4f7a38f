use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// How an identity record was created.
///
/// The tag is fixed at creation and doubles as the partition the record lives
/// in: every identity belongs to exactly one of the three partitions for its
/// entire life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    /// Local email/password signup
    Email,
    /// First successful Google assertion
    Google,
    /// First successful GitHub assertion
    Github,
}

impl LoginMethod {
    /// Fixed order in which partitions are searched when resolving an identity.
    pub const SCAN_ORDER: [LoginMethod; 3] =
        [LoginMethod::Email, LoginMethod::Google, LoginMethod::Github];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
            Self::Github => "github",
        }
    }

    /// Records in the provider partitions carry an external id; local ones never do.
    pub fn is_provider(&self) -> bool {
        !matches!(self, Self::Email)
    }
}

impl FromStr for LoginMethod {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "email" => Ok(Self::Email),
            "google" => Ok(Self::Google),
            "github" => Ok(Self::Github),
            _ => Err(CoreError::InvalidLoginMethod {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
