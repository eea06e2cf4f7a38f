//! Request validation, applied before anything reaches the account service.

use crate::{ApiError, ApiResult};

use idlink_config::ValidationConfig;

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,})+$").expect("valid email regex")
});

pub fn validate_email(email: &str, limits: &ValidationConfig) -> ApiResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ApiError::validation("Email is required", "email"));
    }

    if email.chars().count() > limits.max_email_length {
        return Err(ApiError::validation(
            format!(
                "Email must be at most {} characters",
                limits.max_email_length
            ),
            "email",
        ));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::validation(
            "Please provide a valid email",
            "email",
        ));
    }

    Ok(())
}

pub fn validate_password(
    password: &str,
    field: &'static str,
    limits: &ValidationConfig,
) -> ApiResult<()> {
    if password.chars().count() < limits.min_password_length {
        return Err(ApiError::validation(
            format!(
                "Password must be at least {} characters long",
                limits.min_password_length
            ),
            field,
        ));
    }

    Ok(())
}

/// `label` is the human name ("First name"), `field` the JSON key.
pub fn validate_name(
    value: &str,
    field: &'static str,
    label: &str,
    limits: &ValidationConfig,
) -> ApiResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ApiError::validation(format!("{} is required", label), field));
    }

    if value.chars().count() > limits.max_name_length {
        return Err(ApiError::validation(
            format!(
                "{} must be between 1 and {} characters",
                label, limits.max_name_length
            ),
            field,
        ));
    }

    Ok(())
}
