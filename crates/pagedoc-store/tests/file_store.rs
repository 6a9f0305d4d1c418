//! Integration tests for the file-backed row store.

use pagedoc::LocalizedText;
use pagedoc_store::{FileRowStore, RowStore, StoreError};
use serde_json::json;

#[tokio::test]
async fn test_upsert_select_delete_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRowStore::new(dir.path());

    store
        .upsert_row("index", "hero.title", &LocalizedText::plain("A"))
        .await
        .unwrap();
    store
        .upsert_row(
            "index",
            "hero.subtitle",
            &LocalizedText::with_locale("de", "Hallo"),
        )
        .await
        .unwrap();

    let rows = store.select_namespace("index").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].path, "hero.subtitle");
    assert_eq!(rows[0].value.resolve("de"), Some("Hallo"));

    store.delete_row("index", "hero.title").await.unwrap();
    let rows = store.select_namespace("index").await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_unknown_namespace_selects_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRowStore::new(dir.path());
    assert!(store.select_namespace("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_absent_row_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRowStore::new(dir.path());
    store.delete_row("index", "missing").await.unwrap();
}

#[tokio::test]
async fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileRowStore::new(dir.path());
        store
            .upsert_row("index", "hero.title", &LocalizedText::plain("A"))
            .await
            .unwrap();
    }

    let reopened = FileRowStore::new(dir.path());
    let rows = reopened.select_namespace("index").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, LocalizedText::plain("A"));
}

#[tokio::test]
async fn test_overlay_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRowStore::new(dir.path());

    assert!(store.select_shared_overlay().await.unwrap().is_none());
    store
        .set_shared_overlay(&json!({"footer": {"copyright": "C"}}))
        .await
        .unwrap();

    let overlay = store.select_shared_overlay().await.unwrap().unwrap();
    assert_eq!(overlay["footer"]["copyright"], "C");
}

#[tokio::test]
async fn test_invalid_namespace_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileRowStore::new(dir.path());
    let err = store
        .upsert_row("../escape", "a", &LocalizedText::plain("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidNamespace(_)));
}
