use crate::LoginMethod;

use std::str::FromStr;

#[test]
fn test_login_method_as_str() {
    assert_eq!(LoginMethod::Email.as_str(), "email");
    assert_eq!(LoginMethod::Google.as_str(), "google");
    assert_eq!(LoginMethod::Github.as_str(), "github");
}

#[test]
fn test_login_method_from_str() {
    assert_eq!(LoginMethod::from_str("email").unwrap(), LoginMethod::Email);
    assert_eq!(LoginMethod::from_str("google").unwrap(), LoginMethod::Google);
    assert_eq!(LoginMethod::from_str("github").unwrap(), LoginMethod::Github);
    assert!(LoginMethod::from_str("GitHub").is_err());
    assert!(LoginMethod::from_str("").is_err());
}

#[test]
fn test_scan_order_is_email_google_github() {
    assert_eq!(
        LoginMethod::SCAN_ORDER,
        [LoginMethod::Email, LoginMethod::Google, LoginMethod::Github]
    );
}

#[test]
fn test_only_provider_partitions_are_providers() {
    assert!(!LoginMethod::Email.is_provider());
    assert!(LoginMethod::Google.is_provider());
    assert!(LoginMethod::Github.is_provider());
}

#[test]
fn test_login_method_serializes_lowercase() {
    let json = serde_json::to_string(&LoginMethod::Github).unwrap();
    assert_eq!(json, "\"github\"");
}
