use thiserror::Error;

/// Errors returned by the Nominatim geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from geocoder")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GeocodeError {
    /// `true` when the HTTP client gave up waiting for the geocoder.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeocodeError::Http(e) if e.is_timeout())
    }
}
