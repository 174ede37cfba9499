use dishdb_core::ErrorKind;
use dishdb_fetch::FetchError;
use thiserror::Error;

/// Errors returned by the encyclopedia client.
#[derive(Debug, Error)]
pub enum WikiError {
    /// Transport, status or retry failure from the fetch layer.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The API answered with an `{"error": {...}}` envelope.
    #[error("encyclopedia API error {code}: {info}")]
    Api { code: String, info: String },

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid encyclopedia base URL \"{0}\"")]
    InvalidBaseUrl(String),
}

impl WikiError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WikiError::Fetch(e) => e.kind(),
            WikiError::Api { code, .. } if code == "ratelimited" => ErrorKind::RateLimited,
            WikiError::InvalidBaseUrl(_) => ErrorKind::Validation,
            WikiError::Api { .. } | WikiError::Deserialize { .. } => ErrorKind::Permanent,
        }
    }
}
