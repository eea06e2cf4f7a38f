use crate::{ApiError, OAuthClientError};

use idlink_accounts::AccountError;
use idlink_core::OAuthProvider;
use idlink_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_envelope_with_field() {
    let (status, json) = body_json(ApiError::validation("Email is required", "email")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email is required");
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn given_invalid_credentials_when_rendered_then_401_generic_message() {
    let (status, json) = body_json(AccountError::invalid_credentials().into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["message"], "Invalid email or password");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_already_exists_and_conflict_when_rendered_then_400() {
    let (status, json) = body_json(AccountError::already_exists("taken").into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "ALREADY_EXISTS");

    let (status, json) = body_json(AccountError::conflict("Email is already taken").into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["message"], "Email is already taken");
}

#[tokio::test]
async fn given_token_failure_when_rendered_then_401_without_reason() {
    let (status, json) = body_json(AccountError::unauthorized("TOKEN_EXPIRED").into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Invalid token");
}

#[tokio::test]
async fn given_profile_incomplete_when_rendered_then_401() {
    let (status, json) = body_json(AccountError::profile_incomplete("no id").into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "PROFILE_INCOMPLETE");
}

#[tokio::test]
async fn given_store_failure_when_rendered_then_500_hides_detail() {
    let store_error = AccountError::from(DbError::Initialization {
        message: "disk /var/lib/secret is full".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, json) = body_json(store_error.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Internal server error");
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404() {
    let (status, json) = body_json(ApiError::not_found("Unknown OAuth provider: gitlab")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn given_rejected_code_exchange_when_rendered_then_401() {
    let rejected = OAuthClientError::Rejected {
        provider: OAuthProvider::Github,
        message: "bad_verification_code".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(rejected.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}
