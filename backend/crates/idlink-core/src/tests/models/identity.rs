use crate::{Identity, LoginMethod, OAuthProvider};

use googletest::prelude::*;

#[test]
fn given_local_identity_when_created_then_lives_in_email_partition_unverified() {
    let identity = Identity::new_local(
        "a@x.com".to_string(),
        "$argon2id$hash".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
    );

    assert_that!(identity.partition(), eq(LoginMethod::Email));
    assert_that!(identity.email_verified, eq(false));
    assert_that!(identity.has_password(), eq(true));
    assert_that!(identity.external_id, none());
    assert_that!(identity.google_id(), none());
    assert_that!(identity.github_id(), none());
}

#[test]
fn given_provider_identity_when_created_then_external_id_is_scoped_to_provider() {
    let identity = Identity::new_from_provider(
        OAuthProvider::Github,
        "42".to_string(),
        "octo@x.com".to_string(),
        "Octo".to_string(),
        "Cat".to_string(),
    );

    assert_that!(identity.partition(), eq(LoginMethod::Github));
    assert_that!(identity.email_verified, eq(true));
    assert_that!(identity.has_password(), eq(false));
    assert_that!(identity.github_id(), some(eq("42")));
    assert_that!(identity.google_id(), none());
}

#[test]
fn given_empty_last_name_when_full_name_then_no_trailing_space() {
    let identity = Identity::new_from_provider(
        OAuthProvider::Github,
        "7".to_string(),
        "solo@github.com".to_string(),
        "solo".to_string(),
        String::new(),
    );

    assert_that!(identity.full_name(), eq("solo"));
}

#[test]
fn given_identity_when_login_recorded_then_last_login_moves_forward() {
    let mut identity = Identity::new_local(
        "a@x.com".to_string(),
        "hash".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
    );
    let before = identity.last_login_at;

    identity.record_login();

    assert_that!(identity.last_login_at >= before, eq(true));
    assert_that!(identity.created_at, eq(before));
}

#[test]
fn given_new_identity_then_timestamps_have_millisecond_precision() {
    let identity = Identity::new_local(
        "a@x.com".to_string(),
        "hash".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
    );

    assert_that!(identity.created_at.timestamp_subsec_nanos() % 1_000_000, eq(0));
}
