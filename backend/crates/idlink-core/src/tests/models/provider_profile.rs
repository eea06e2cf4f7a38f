use crate::{OAuthProvider, ProviderProfile};

use googletest::prelude::*;

fn profile(external_id: &str) -> ProviderProfile {
    ProviderProfile {
        external_id: external_id.to_string(),
        ..ProviderProfile::default()
    }
}

#[test]
fn given_given_and_family_name_when_name_parts_then_they_win() {
    let p = ProviderProfile {
        given_name: Some("Ann".to_string()),
        family_name: Some("Lee".to_string()),
        display_name: Some("Someone Else".to_string()),
        ..profile("g1")
    };

    assert_that!(
        p.name_parts(),
        some(eq(&("Ann".to_string(), "Lee".to_string())))
    );
}

#[test]
fn given_only_display_name_when_name_parts_then_split_first_word_and_rest() {
    let p = ProviderProfile {
        display_name: Some("  Mary Ann  van Dyke ".to_string()),
        ..profile("g1")
    };

    assert_that!(
        p.name_parts(),
        some(eq(&("Mary".to_string(), "Ann van Dyke".to_string())))
    );
}

#[test]
fn given_only_username_when_name_parts_then_username_is_first_name() {
    let p = ProviderProfile {
        username: Some("octocat".to_string()),
        ..profile("42")
    };

    assert_that!(
        p.name_parts(),
        some(eq(&("octocat".to_string(), String::new())))
    );
}

#[test]
fn given_no_name_material_when_name_parts_then_none() {
    assert_that!(profile("42").name_parts(), none());
}

#[test]
fn given_long_names_when_name_parts_then_truncated_to_fifty_chars() {
    let p = ProviderProfile {
        given_name: Some("a".repeat(80)),
        family_name: Some("b".repeat(51)),
        ..profile("g1")
    };

    let (first, last) = p.name_parts().unwrap();
    assert_that!(first.chars().count(), eq(50));
    assert_that!(last.chars().count(), eq(50));
}

#[test]
fn given_mixed_case_email_when_email_then_normalized() {
    let p = ProviderProfile {
        email: Some("  Ann.Lee@X.COM ".to_string()),
        ..profile("g1")
    };

    assert_that!(p.email(), some(eq("ann.lee@x.com")));
}

#[test]
fn given_blank_email_when_email_then_none() {
    let p = ProviderProfile {
        email: Some("   ".to_string()),
        ..profile("g1")
    };

    assert_that!(p.email(), none());
}

#[test]
fn given_username_when_placeholder_email_then_uses_provider_domain() {
    let p = ProviderProfile {
        username: Some("OctoCat".to_string()),
        ..profile("42")
    };

    assert_that!(
        p.placeholder_email(OAuthProvider::Github),
        some(eq("octocat@github.com"))
    );
}

#[test]
fn given_blank_external_id_when_external_id_then_none() {
    assert_that!(profile("  ").external_id(), none());
    assert_that!(profile(" 42 ").external_id(), some(eq("42")));
}

#[test]
fn given_camel_case_json_when_deserialized_then_fields_map() {
    let p: ProviderProfile = serde_json::from_str(
        r#"{"externalId":"g1","email":"a@x.com","givenName":"Ann","avatarUrl":"https://img"}"#,
    )
    .unwrap();

    assert_that!(p.external_id, eq("g1"));
    assert_that!(p.given_name, some(eq("Ann")));
    assert_that!(p.avatar_url, some(eq("https://img")));
    assert_that!(p.username, none());
}
