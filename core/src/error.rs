use crate::namespace::Namespace;
use thiserror::Error;

/// Failures of the index-metadata source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("namespace {0} not found")]
    NotFound(Namespace),
    #[error("index source backend: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SourceError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self { SourceError::Backend(Box::new(err)) }
}

/// Errors surfaced by coverage analysis. Unsupported predicate shapes are
/// not errors; they make the analysis answer `false`.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("invalid namespace: {0:?}")]
    InvalidNamespace(String),
    #[error("index source: {0}")]
    Source(#[from] SourceError),
}
