use crate::ApiError;
use crate::api::validation::{validate_email, validate_name, validate_password};

use idlink_config::ValidationConfig;

use googletest::prelude::*;

fn field_of(result: crate::ApiResult<()>) -> Option<String> {
    match result {
        Err(ApiError::Validation { field, .. }) => field,
        _ => None,
    }
}

#[test]
fn given_well_formed_emails_when_validated_then_ok() {
    let limits = ValidationConfig::default();

    for email in ["a@x.com", "first.last@sub.example.org", "a-b@x-y.io"] {
        assert_that!(validate_email(email, &limits), ok(anything()));
    }
}

#[test]
fn given_malformed_emails_when_validated_then_email_field_error() {
    let limits = ValidationConfig::default();

    for email in ["", "plain", "a@x", "@x.com", "a@.com", "a b@x.com"] {
        assert_that!(
            field_of(validate_email(email, &limits)),
            some(eq("email")),
            "email {:?}",
            email
        );
    }
}

#[test]
fn given_short_password_when_validated_then_error() {
    let limits = ValidationConfig::default();

    assert_that!(
        field_of(validate_password("12345", "password", &limits)),
        some(eq("password"))
    );
    assert_that!(
        validate_password("123456", "password", &limits),
        ok(anything())
    );
}

#[test]
fn given_names_when_validated_then_required_and_bounded() {
    let limits = ValidationConfig::default();

    assert_that!(
        validate_name("Ann", "firstName", "First name", &limits),
        ok(anything())
    );
    assert_that!(
        field_of(validate_name("  ", "firstName", "First name", &limits)),
        some(eq("firstName"))
    );
    assert_that!(
        field_of(validate_name(&"x".repeat(51), "lastName", "Last name", &limits)),
        some(eq("lastName"))
    );
}
