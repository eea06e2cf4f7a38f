//! Identity entity - one authenticated principal inside a single partition.

use crate::{LoginMethod, OAuthProvider};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user record.
///
/// The same email may appear in up to three records, one per partition; each
/// record stays independently addressable by its own id and external id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Normalized (trimmed, lower-cased) address
    pub email: String,
    /// Present only for records created through local signup
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Provider-scoped id (`googleId` / `githubId`); always `None` in the email partition
    pub external_id: Option<String>,
    /// Fixed at creation; names the partition the record lives in
    pub login_method: LoginMethod,
    pub avatar_url: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl Identity {
    /// Create a record for the email partition.
    pub fn new_local(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Self::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: Some(password_hash),
            first_name,
            last_name,
            external_id: None,
            login_method: LoginMethod::Email,
            avatar_url: None,
            email_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: now,
        }
    }

    /// Create a record for a provider partition.
    pub fn new_from_provider(
        provider: OAuthProvider,
        external_id: String,
        email: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Self::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: None,
            first_name,
            last_name,
            external_id: Some(external_id),
            login_method: provider.partition(),
            avatar_url: None,
            email_verified: true,
            created_at: now,
            updated_at: now,
            last_login_at: now,
        }
    }

    /// Current time at the precision the store keeps (milliseconds).
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }

    /// Partition this record lives in.
    pub fn partition(&self) -> LoginMethod {
        self.login_method
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn google_id(&self) -> Option<&str> {
        match self.login_method {
            LoginMethod::Google => self.external_id.as_deref(),
            _ => None,
        }
    }

    pub fn github_id(&self) -> Option<&str> {
        match self.login_method {
            LoginMethod::Github => self.external_id.as_deref(),
            _ => None,
        }
    }

    /// Refresh `last_login_at` after a successful authentication.
    pub fn record_login(&mut self) {
        let now = Self::now();
        self.last_login_at = now;
        self.updated_at = now;
    }

    /// Bump `updated_at` after a profile or credential mutation.
    pub fn touch(&mut self) {
        self.updated_at = Self::now();
    }
}
