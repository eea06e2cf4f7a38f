//! Bearer-token authentication for REST handlers

use crate::{ApiError, AppState};

use idlink_core::Identity;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The identity asserted by the request's `Authorization: Bearer <token>` header.
///
/// Every request is authenticated on its own; there is no session.
pub struct AuthenticatedIdentity(pub Identity);

impl FromRequestParts<AppState> for AuthenticatedIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(parts)
                .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

            let identity = state.accounts.authenticate(token).await?;
            log::debug!("Authenticated identity {}", identity.id);

            Ok(AuthenticatedIdentity(identity))
        }
    }
}

/// Token from `Authorization: Bearer <token>`; scheme match is case-insensitive.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
