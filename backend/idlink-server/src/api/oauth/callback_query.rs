use serde::Deserialize;

/// Query string the provider appends when sending the browser back.
///
/// On consent: `code` and `state`. On refusal: `error` (and usually `state`).
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
