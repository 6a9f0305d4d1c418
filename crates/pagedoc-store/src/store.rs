//! Row store contract: the persistence collaborator for the document engine.
//!
//! The engine treats storage as a row-returning and row-accepting store
//! keyed uniquely by `(namespace, path)`. Adapters implement [`RowStore`];
//! the engine never holds a cache, lock, or pool of its own.

use async_trait::async_trait;
use pagedoc::LocalizedText;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The atomic persisted unit: one localized value at one path within one
/// namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Owning namespace: a page id, or the reserved shared namespace.
    pub namespace: String,
    /// Wire-form path, e.g. `hero.cards[2].title`.
    pub path: String,
    /// Locale-keyed text value.
    pub value: LocalizedText,
}

impl Entry {
    /// Create an entry.
    pub fn new(
        namespace: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<LocalizedText>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
            value: value.into(),
        }
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid namespace (path traversal, control chars, etc.).
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence contract for entry rows and the singleton shared overlay.
///
/// All operations key rows by `(namespace, path)`, the one globally-unique
/// key discipline, applied everywhere.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Load all rows owned by any of the given namespaces.
    async fn select_rows(&self, namespaces: &[&str]) -> Result<Vec<Entry>, StoreError>;

    /// Load the singleton shared overlay document, if one exists.
    ///
    /// `Ok(None)` is a normal lookup miss, not an error.
    async fn select_shared_overlay(&self) -> Result<Option<Value>, StoreError>;

    /// Insert or replace the row keyed by `(namespace, path)`.
    async fn upsert_row(
        &self,
        namespace: &str,
        path: &str,
        value: &LocalizedText,
    ) -> Result<(), StoreError>;

    /// Delete the row keyed by `(namespace, path)`.
    ///
    /// Idempotent: deleting an absent row is not an error.
    async fn delete_row(&self, namespace: &str, path: &str) -> Result<(), StoreError>;

    /// Load rows for a single namespace. Convenience wrapper.
    async fn select_namespace(&self, namespace: &str) -> Result<Vec<Entry>, StoreError> {
        self.select_rows(&[namespace]).await
    }
}
