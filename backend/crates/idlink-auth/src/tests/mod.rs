
use crate::CredentialHasher;

/// Cheap work factor so the suite stays fast
pub(crate) fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(4096, 1, 1).unwrap()
}
