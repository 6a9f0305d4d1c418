//! Service-level errors.

use crate::StoreError;
use pagedoc::DocError;
use thiserror::Error;

/// Errors surfaced by the reconciler and editor services.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No rows exist for the requested namespace.
    #[error("no content for namespace {0:?}")]
    NotFound(String),

    /// Document engine failure.
    #[error(transparent)]
    Doc(#[from] DocError),

    /// Row store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
