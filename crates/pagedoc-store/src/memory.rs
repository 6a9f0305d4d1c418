//! In-memory row store for testing and local development.

use crate::{Entry, RowStore, StoreError};
use async_trait::async_trait;
use pagedoc::LocalizedText;
use serde_json::Value;
use std::collections::BTreeMap;

/// In-memory storage keyed by `(namespace, path)`.
#[derive(Default)]
pub struct MemoryRowStore {
    rows: tokio::sync::RwLock<BTreeMap<(String, String), LocalizedText>>,
    overlay: tokio::sync::RwLock<Option<Value>>,
}

impl MemoryRowStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of rows (test seeding).
    pub async fn seed(&self, entries: impl IntoIterator<Item = Entry>) {
        let mut rows = self.rows.write().await;
        for entry in entries {
            rows.insert((entry.namespace, entry.path), entry.value);
        }
    }

    /// Set or replace the singleton shared overlay document.
    pub async fn set_shared_overlay(&self, overlay: Value) {
        *self.overlay.write().await = Some(overlay);
    }

    /// Total number of stored rows.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn select_rows(&self, namespaces: &[&str]) -> Result<Vec<Entry>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|((ns, _), _)| namespaces.contains(&ns.as_str()))
            .map(|((ns, path), value)| Entry::new(ns.clone(), path.clone(), value.clone()))
            .collect())
    }

    async fn select_shared_overlay(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.overlay.read().await.clone())
    }

    async fn upsert_row(
        &self,
        namespace: &str,
        path: &str,
        value: &LocalizedText,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.insert((namespace.to_owned(), path.to_owned()), value.clone());
        Ok(())
    }

    async fn delete_row(&self, namespace: &str, path: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.remove(&(namespace.to_owned(), path.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let store = MemoryRowStore::new();
        store
            .upsert_row("index", "hero.title", &LocalizedText::plain("old"))
            .await
            .unwrap();
        store
            .upsert_row("index", "hero.title", &LocalizedText::plain("new"))
            .await
            .unwrap();

        let rows = store.select_namespace("index").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, LocalizedText::plain("new"));
    }

    #[tokio::test]
    async fn test_select_rows_scopes_namespaces() {
        let store = MemoryRowStore::new();
        store
            .seed(vec![
                Entry::new("index", "a", "1"),
                Entry::new("about", "b", "2"),
                Entry::new("__shared__", "c", "3"),
            ])
            .await;

        let rows = store.select_rows(&["index", "__shared__"]).await.unwrap();
        let namespaces: Vec<_> = rows.iter().map(|e| e.namespace.as_str()).collect();
        assert_eq!(namespaces, vec!["__shared__", "index"]);
    }

    #[tokio::test]
    async fn test_delete_absent_row_is_ok() {
        let store = MemoryRowStore::new();
        store.delete_row("index", "missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_overlay_roundtrip() {
        let store = MemoryRowStore::new();
        assert!(store.select_shared_overlay().await.unwrap().is_none());

        store
            .set_shared_overlay(serde_json::json!({"footer": {"copyright": "C"}}))
            .await;
        let overlay = store.select_shared_overlay().await.unwrap().unwrap();
        assert_eq!(overlay["footer"]["copyright"], "C");
    }
}
