//! Profile handed back by an OAuth provider after its own code exchange.

use crate::{MAX_NAME_LENGTH, OAuthProvider, normalize_email};

use serde::{Deserialize, Serialize};

/// Provider profile as consumed by account linking.
///
/// Only `external_id` is guaranteed; GitHub in particular may omit the email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    /// Provider login handle (GitHub `login`)
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl ProviderProfile {
    /// Trimmed external id, `None` when blank.
    pub fn external_id(&self) -> Option<&str> {
        non_blank(Some(&self.external_id))
    }

    /// Normalized email, `None` when absent or blank.
    pub fn email(&self) -> Option<String> {
        non_blank(self.email.as_deref()).map(normalize_email)
    }

    /// Address synthesized from the username for profiles without an email.
    pub fn placeholder_email(&self, provider: OAuthProvider) -> Option<String> {
        non_blank(self.username.as_deref())
            .map(|username| normalize_email(&format!("{}@{}", username, provider.placeholder_domain())))
    }

    pub fn avatar_url(&self) -> Option<String> {
        non_blank(self.avatar_url.as_deref()).map(str::to_string)
    }

    /// First/last name pair derived from the profile.
    ///
    /// Preference: given/family name, then the display name split at the first
    /// whitespace run, then the username as first name. Returns `None` when no
    /// first name can be derived.
    pub fn name_parts(&self) -> Option<(String, String)> {
        let display = non_blank(self.display_name.as_deref());
        let mut display_words = display.map(|d| d.split_whitespace()).into_iter().flatten();
        let display_first = display_words.next().map(str::to_string);
        let display_rest = display_words.collect::<Vec<_>>().join(" ");

        let first = non_blank(self.given_name.as_deref())
            .map(str::to_string)
            .or(display_first)
            .or_else(|| non_blank(self.username.as_deref()).map(str::to_string))?;

        let last = non_blank(self.family_name.as_deref())
            .map(str::to_string)
            .unwrap_or(display_rest);

        Some((truncate_name(&first), truncate_name(&last)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn truncate_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_LENGTH).collect()
}
