use thiserror::Error;

/// Errors returned by the Overpass client.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The interpreter answered with a non-2xx status.
    #[error("Overpass API request failed with status {status}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid ISO 3166-1 alpha-2 country code: {0:?}")]
    InvalidCountryCode(String),

    #[error("invalid Overpass endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
