use idlink_core::OAuthProvider;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures talking to a provider during the code exchange.
#[derive(Debug, Error)]
pub enum OAuthClientError {
    /// The provider refused the exchange or answered without the data we need
    #[error("{provider} rejected the code exchange: {message} {location}")]
    Rejected {
        provider: OAuthProvider,
        message: String,
        location: ErrorLocation,
    },

    #[error("{provider} request failed: {source} {location}")]
    Http {
        provider: OAuthProvider,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}
