use dishdb_core::{CatalogError, ErrorKind};
use dishdb_wiki::WikiError;
use thiserror::Error;

/// Failures that abort a pipeline run. Per-item failures inside a bulk run
/// are recorded in its summary instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("encyclopedia error: {0}")]
    Wiki(#[from] WikiError),
}

impl PipelineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Catalog(e) => e.kind(),
            PipelineError::Wiki(e) => e.kind(),
        }
    }
}
