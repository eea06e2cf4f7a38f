use idlink_core::{Identity, LoginMethod};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of an identity. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDto {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub login_method: LoginMethod,
    pub google_id: Option<String>,
    pub github_id: Option<String>,
    pub avatar_url: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityDto {
    fn from(i: &Identity) -> Self {
        Self {
            id: i.id.to_string(),
            email: i.email.clone(),
            first_name: i.first_name.clone(),
            last_name: i.last_name.clone(),
            full_name: i.full_name(),
            login_method: i.login_method,
            google_id: i.google_id().map(str::to_string),
            github_id: i.github_id().map(str::to_string),
            avatar_url: i.avatar_url.clone(),
            email_verified: i.email_verified,
            created_at: i.created_at,
            updated_at: i.updated_at,
            last_login_at: i.last_login_at,
        }
    }
}

impl From<Identity> for IdentityDto {
    fn from(i: Identity) -> Self {
        Self::from(&i)
    }
}

/// `data` payload for endpoints returning a single identity
#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: IdentityDto,
}
