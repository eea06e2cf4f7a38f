//! Email/password auth handlers

use crate::api::validation::{validate_email, validate_name, validate_password};
use crate::{
    ApiError, ApiResponse, ApiResult, AppState, AuthData, AuthenticatedIdentity, SigninRequest,
    SignupRequest, UserData,
};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    let Json(req) = payload?;
    let limits = &state.validation;

    validate_email(&req.email, limits)?;
    validate_password(&req.password, "password", limits)?;
    validate_name(&req.first_name, "firstName", "First name", limits)?;
    validate_name(&req.last_name, "lastName", "Last name", limits)?;

    let session = state
        .accounts
        .signup(idlink_accounts::SignupRequest {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User created successfully",
            AuthData::from(session),
        )),
    ))
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AuthData>>> {
    let Json(req) = payload?;

    validate_email(&req.email, &state.validation)?;
    if req.password.is_empty() {
        return Err(ApiError::validation("Password is required", "password"));
    }

    let session = state.accounts.signin(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthData::from(session),
    )))
}

/// GET /api/auth/me
pub async fn me(
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    Ok(Json(ApiResponse::data(UserData {
        user: identity.into(),
    })))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Logged out successfully"))
}
