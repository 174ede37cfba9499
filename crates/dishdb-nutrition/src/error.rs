use dishdb_core::ErrorKind;
use dishdb_fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Rate-limit reported inside a successful response body
    /// (`OVER_RATE_LIMIT`), as opposed to an HTTP 429.
    #[error("{provider} rate limit exceeded: {message}")]
    RateLimited {
        provider: &'static str,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {provider} base URL \"{url}\"")]
    InvalidBaseUrl { provider: &'static str, url: String },
}

impl NutritionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NutritionError::Fetch(e) => e.kind(),
            NutritionError::RateLimited { .. } => ErrorKind::RateLimited,
            NutritionError::InvalidBaseUrl { .. } => ErrorKind::Validation,
            NutritionError::Deserialize { .. } => ErrorKind::Permanent,
        }
    }
}
