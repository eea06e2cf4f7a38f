use serde::{Deserialize, Serialize};

/// Claims carried by an OAuth `state` value.
///
/// Bound to the provider the flow was started for. Has no `sub`, so it can
/// never pass as an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateClaims {
    pub provider: String,
    pub iat: i64,
    pub exp: i64,
    pub nonce: String,
}
