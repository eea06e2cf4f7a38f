use crate::IdentityDto;

use idlink_accounts::AuthSession;

use serde::Serialize;

/// `data` payload for signup and signin
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: IdentityDto,
    pub token: String,
}

impl From<AuthSession> for AuthData {
    fn from(session: AuthSession) -> Self {
        Self {
            user: IdentityDto::from(&session.identity),
            token: session.token,
        }
    }
}
