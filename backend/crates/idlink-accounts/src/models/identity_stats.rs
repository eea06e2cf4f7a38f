use idlink_core::{Identity, LoginMethod};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityStats {
    pub account_created: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub login_method: LoginMethod,
    pub email_verified: bool,
}

impl From<&Identity> for IdentityStats {
    fn from(identity: &Identity) -> Self {
        Self {
            account_created: identity.created_at,
            last_login_at: identity.last_login_at,
            login_method: identity.login_method,
            email_verified: identity.email_verified,
        }
    }
}
