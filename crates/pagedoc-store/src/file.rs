//! File-backed row store: one JSON file per namespace.
//!
//! Intended for local development and small deployments. Each namespace's
//! rows live in `<base>/<namespace>.json` as a path → value map; the
//! shared overlay document lives in a reserved `__overlay__.json`.

use crate::{Entry, RowStore, StoreError};
use async_trait::async_trait;
use pagedoc::LocalizedText;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

const OVERLAY_FILE: &str = "__overlay__.json";

/// Row store persisting each namespace as a JSON file under a base directory.
pub struct FileRowStore {
    base_path: PathBuf,
}

impl FileRowStore {
    /// Create a file store rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn namespace_path(&self, namespace: &str) -> Result<PathBuf, StoreError> {
        Self::validate_namespace(namespace)?;
        Ok(self.base_path.join(format!("{namespace}.json")))
    }

    /// Validate that a namespace is safe for use as a filename.
    /// Rejects path separators, `..`, and control characters.
    fn validate_namespace(namespace: &str) -> Result<(), StoreError> {
        if namespace.is_empty() {
            return Err(StoreError::InvalidNamespace(
                "namespace cannot be empty".to_owned(),
            ));
        }
        if namespace.contains('/')
            || namespace.contains('\\')
            || namespace.contains("..")
            || namespace.contains('\0')
        {
            return Err(StoreError::InvalidNamespace(format!(
                "namespace contains invalid characters: {namespace:?}"
            )));
        }
        if namespace.chars().any(|c| c.is_control()) {
            return Err(StoreError::InvalidNamespace(format!(
                "namespace contains control characters: {namespace:?}"
            )));
        }
        Ok(())
    }

    async fn load_namespace(
        &self,
        namespace: &str,
    ) -> Result<BTreeMap<String, LocalizedText>, StoreError> {
        let path = self.namespace_path(namespace)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn save_namespace(
        &self,
        namespace: &str,
        rows: &BTreeMap<String, LocalizedText>,
    ) -> Result<(), StoreError> {
        let path = self.namespace_path(namespace)?;
        tokio::fs::create_dir_all(&self.base_path).await?;
        let bytes = serde_json::to_vec_pretty(rows)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        Ok(())
    }

    /// Set or replace the singleton shared overlay document.
    pub async fn set_shared_overlay(&self, overlay: &Value) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        let bytes = serde_json::to_vec_pretty(overlay)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut file = tokio::fs::File::create(self.base_path.join(OVERLAY_FILE)).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl RowStore for FileRowStore {
    async fn select_rows(&self, namespaces: &[&str]) -> Result<Vec<Entry>, StoreError> {
        let mut entries = Vec::new();
        for namespace in namespaces {
            let rows = self.load_namespace(namespace).await?;
            entries.extend(
                rows.into_iter()
                    .map(|(path, value)| Entry::new(*namespace, path, value)),
            );
        }
        Ok(entries)
    }

    async fn select_shared_overlay(&self) -> Result<Option<Value>, StoreError> {
        let path = self.base_path.join(OVERLAY_FILE);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn upsert_row(
        &self,
        namespace: &str,
        path: &str,
        value: &LocalizedText,
    ) -> Result<(), StoreError> {
        let mut rows = self.load_namespace(namespace).await?;
        rows.insert(path.to_owned(), value.clone());
        self.save_namespace(namespace, &rows).await
    }

    async fn delete_row(&self, namespace: &str, path: &str) -> Result<(), StoreError> {
        let mut rows = self.load_namespace(namespace).await?;
        if rows.remove(path).is_some() {
            self.save_namespace(namespace, &rows).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace_rejects_traversal() {
        assert!(FileRowStore::validate_namespace("../etc").is_err());
        assert!(FileRowStore::validate_namespace("a/b").is_err());
        assert!(FileRowStore::validate_namespace("a\\b").is_err());
        assert!(FileRowStore::validate_namespace("").is_err());
        assert!(FileRowStore::validate_namespace("a\tb").is_err());
        assert!(FileRowStore::validate_namespace("index").is_ok());
        assert!(FileRowStore::validate_namespace("__shared__").is_ok());
    }
}
