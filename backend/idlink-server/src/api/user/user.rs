//! Profile handlers for the authenticated identity

use crate::api::validation::{validate_email, validate_name, validate_password};
use crate::{
    ApiResponse, ApiResult, AppState, AuthenticatedIdentity, ChangePasswordRequest, StatsData,
    UpdateProfileRequest, UserData,
};

use idlink_accounts::ProfileUpdate;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// GET /api/user/profile
pub async fn get_profile(
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    Ok(Json(ApiResponse::data(UserData {
        user: identity.into(),
    })))
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<UserData>>> {
    let Json(req) = payload?;
    let limits = &state.validation;

    if let Some(email) = &req.email {
        validate_email(email, limits)?;
    }
    if let Some(first_name) = &req.first_name {
        validate_name(first_name, "firstName", "First name", limits)?;
    }
    if let Some(last_name) = &req.last_name {
        validate_name(last_name, "lastName", "Last name", limits)?;
    }

    let updated = state
        .accounts
        .update_profile(
            identity,
            ProfileUpdate {
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
            },
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        UserData {
            user: updated.into(),
        },
    )))
}

/// PUT /api/user/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Json(req) = payload?;

    validate_password(&req.new_password, "newPassword", &state.validation)?;

    state
        .accounts
        .change_password(identity, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// DELETE /api/user/account
///
/// Removes only the record the token was issued for; same-email records in
/// other partitions stay.
pub async fn delete_account(
    State(state): State<AppState>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.accounts.delete_account(&identity).await?;

    Ok(Json(ApiResponse::message("Account deleted successfully")))
}

/// GET /api/user/stats
pub async fn stats(
    State(state): State<AppState>,
    AuthenticatedIdentity(identity): AuthenticatedIdentity,
) -> ApiResult<Json<ApiResponse<StatsData>>> {
    Ok(Json(ApiResponse::data(StatsData {
        stats: state.accounts.stats(&identity),
    })))
}
