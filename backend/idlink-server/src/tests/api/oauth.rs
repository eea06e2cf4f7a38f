use crate::api::oauth::oauth::{authorization_url, frontend_error_url, frontend_redirect_url};

use idlink_config::OAuthProviderConfig;
use idlink_core::OAuthProvider;

use googletest::prelude::*;

fn config() -> OAuthProviderConfig {
    OAuthProviderConfig {
        client_id: "client-123".to_string(),
        client_secret: "secret-123".to_string(),
        redirect_url: "http://localhost:8000/api/auth/google/callback".to_string(),
    }
}

#[test]
fn given_google_when_authorization_url_built_then_carries_client_and_scope() {
    let url = authorization_url(OAuthProvider::Google, &config(), "state-1").unwrap();

    assert_that!(url.host_str(), some(eq("accounts.google.com")));
    let query = url.query().unwrap_or_default();
    assert_that!(query, contains_substring("client_id=client-123"));
    assert_that!(query, contains_substring("scope=profile+email"));
    assert_that!(query, contains_substring("response_type=code"));
    assert_that!(query, contains_substring("state=state-1"));
}

#[test]
fn given_github_when_authorization_url_built_then_requests_email_scope() {
    let url = authorization_url(OAuthProvider::Github, &config(), "s").unwrap();

    assert_that!(url.host_str(), some(eq("github.com")));
    assert_that!(url.as_str(), contains_substring("scope=user%3Aemail"));
}

#[test]
fn given_frontend_with_trailing_slash_when_redirect_built_then_single_slash() {
    let url = frontend_redirect_url("http://localhost:3000/", "a.b.c", OAuthProvider::Github)
        .unwrap();

    assert_that!(
        url.as_str(),
        eq("http://localhost:3000/auth/callback?token=a.b.c&provider=github")
    );
}

#[test]
fn given_frontend_when_error_url_built_then_generic_message_only() {
    let url = frontend_error_url("http://localhost:3000", OAuthProvider::Google).unwrap();

    assert_that!(
        url.as_str(),
        eq("http://localhost:3000/auth/error?message=OAuth+authentication+failed&provider=google")
    );
}

#[test]
fn given_authorization_url_when_built_then_secret_not_exposed() {
    let url = authorization_url(OAuthProvider::Github, &config(), "s").unwrap();

    assert_that!(url.as_str(), not(contains_substring("secret-123")));
}
