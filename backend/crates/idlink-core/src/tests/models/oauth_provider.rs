use crate::{LoginMethod, OAuthProvider};

use std::str::FromStr;

#[test]
fn test_provider_maps_to_its_partition() {
    assert_eq!(OAuthProvider::Google.partition(), LoginMethod::Google);
    assert_eq!(OAuthProvider::Github.partition(), LoginMethod::Github);
}

#[test]
fn test_provider_from_str_rejects_email() {
    assert_eq!(
        OAuthProvider::from_str("google").unwrap(),
        OAuthProvider::Google
    );
    assert_eq!(
        OAuthProvider::from_str("github").unwrap(),
        OAuthProvider::Github
    );
    assert!(OAuthProvider::from_str("email").is_err());
}
