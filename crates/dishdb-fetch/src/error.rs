use dishdb_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("server error {status} from {url}")]
    ServerError { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::NotFound { .. } => ErrorKind::NotFound,
            FetchError::RateLimited { .. } => ErrorKind::RateLimited,
            FetchError::ServerError { .. } => ErrorKind::Transient,
            FetchError::Http(e) if e.is_timeout() || e.is_connect() => ErrorKind::Transient,
            FetchError::InvalidUrl { .. } => ErrorKind::Validation,
            FetchError::Http(_)
            | FetchError::Deserialize { .. }
            | FetchError::UnexpectedStatus { .. } => ErrorKind::Permanent,
        }
    }
}
