use idlink_core::Identity;

/// An authenticated identity together with the bearer token minted for it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub identity: Identity,
    pub token: String,
}
