use idlink_core::{Identity, OAuthProvider};

pub fn create_local_identity(email: &str) -> Identity {
    Identity::new_local(
        email.to_string(),
        "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
    )
}

pub fn create_provider_identity(
    provider: OAuthProvider,
    external_id: &str,
    email: &str,
) -> Identity {
    Identity::new_from_provider(
        provider,
        external_id.to_string(),
        email.to_string(),
        "Ann".to_string(),
        "Lee".to_string(),
    )
}
