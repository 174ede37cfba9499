use thiserror::Error;

/// Coarse classification shared by every error type in the workspace.
///
/// Bulk runs branch on this (and record it per failed item) instead of
/// matching on crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The entry, page or endpoint does not exist.
    NotFound,
    /// The provider asked us to slow down.
    RateLimited,
    /// Network failure or 5xx; worth retrying later.
    Transient,
    /// Malformed input rejected before any I/O.
    Validation,
    /// Anything else: 4xx, malformed responses, backend failures.
    Permanent,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::RateLimited => write!(f, "rate_limited"),
            ErrorKind::Transient => write!(f, "transient"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Permanent => write!(f, "permanent"),
        }
    }
}

/// Errors returned by a [`crate::CatalogStore`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry not found: {id}")]
    NotFound { id: String },

    #[error("invalid catalog entry: {0}")]
    Validation(String),

    #[error("catalog backend error: {0}")]
    Backend(String),
}

impl CatalogError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::Backend(_) => ErrorKind::Transient,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read crawl config {path}: {source}")]
    CrawlFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse crawl config: {0}")]
    CrawlFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
