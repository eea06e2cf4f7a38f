use crate::api::extractors::authenticated_identity::bearer_token;

use axum::http::Request;
use googletest::prelude::*;

fn parts_with(header: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(value) = header {
        builder = builder.header("Authorization", value);
    }
    builder.body(()).unwrap().into_parts().0
}

#[test]
fn given_bearer_header_when_parsed_then_token_returned() {
    let parts = parts_with(Some("Bearer abc.def.ghi"));

    assert_that!(bearer_token(&parts), some(eq("abc.def.ghi")));
}

#[test]
fn given_lowercase_scheme_when_parsed_then_token_returned() {
    let parts = parts_with(Some("bearer abc"));

    assert_that!(bearer_token(&parts), some(eq("abc")));
}

#[test]
fn given_missing_or_foreign_header_when_parsed_then_none() {
    assert_that!(bearer_token(&parts_with(None)), none());
    assert_that!(bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))), none());
    assert_that!(bearer_token(&parts_with(Some("Bearer   "))), none());
    assert_that!(bearer_token(&parts_with(Some("Bearer"))), none());
}
