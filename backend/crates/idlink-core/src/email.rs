/// Canonical form used for every email comparison and every stored address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
