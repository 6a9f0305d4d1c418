//! Namespace reconciliation: rows from page + shared scopes into one
//! canonical page document.
//!
//! Handles the two historical sources of subtle bugs in the row format:
//! legacy paths that redundantly repeat their own namespace id as a prefix,
//! and shared-namespace rows that must never collide with page content.

use crate::{EngineConfig, EngineError, Entry, RowStore};
use pagedoc::{build_document, Path};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Case-normalize a namespace id.
pub fn normalize_namespace(namespace: &str) -> String {
    namespace.trim().to_ascii_lowercase()
}

/// Strip a legacy self-referential namespace prefix from a path.
///
/// Namespace `index` with stored path `index.hero.title` canonicalizes to
/// `hero.title`; any other path is returned unchanged.
pub fn canonical_path(namespace: &str, path: &str) -> String {
    let prefix_len = namespace.len();
    let bytes = path.as_bytes();
    // Byte-wise comparison: `prefix_len` may not be a char boundary of
    // `path`, so a str slice could panic on multi-byte keys. A `.` at
    // `prefix_len` guarantees the suffix slice below starts on a boundary.
    if bytes.len() > prefix_len + 1
        && bytes[..prefix_len].eq_ignore_ascii_case(namespace.as_bytes())
        && bytes[prefix_len] == b'.'
    {
        path[prefix_len + 1..].to_owned()
    } else {
        path.to_owned()
    }
}

/// A stored row made stale by a canonical sibling; eligible for deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaleRow {
    /// Namespace the stale row is stored under.
    pub namespace: String,
    /// The stale row's stored (legacy) path.
    pub path: String,
}

/// Result of reconciling a page's rows.
#[derive(Clone, Debug)]
pub struct Reconciled {
    /// The canonical page document.
    pub document: Value,
    /// Legacy rows superseded by canonical ones, scheduled for deletion.
    pub stale: Vec<StaleRow>,
}

struct Slot<'a> {
    path: String,
    entry: &'a Entry,
    was_canonical: bool,
}

/// Reconcile rows into the canonical document for `requested`.
///
/// Steps, in order: scope rows to the requested + shared namespaces
/// (`NotFound` when that leaves nothing); canonicalize page paths,
/// preferring the clean key over a legacy duplicate regardless of row
/// order; nest shared rows under the reserved shared key; build the tree;
/// merge overlay sections (overwriting). Overlay absence is not an error.
pub fn reconcile(
    requested: &str,
    rows: &[Entry],
    shared_overlay: Option<&Value>,
    config: &EngineConfig,
) -> Result<Reconciled, EngineError> {
    let requested = normalize_namespace(requested);
    let shared = &config.shared_namespace;

    let scoped: Vec<&Entry> = rows
        .iter()
        .filter(|entry| {
            let ns = normalize_namespace(&entry.namespace);
            ns == requested || ns == *shared
        })
        .collect();
    if scoped.is_empty() {
        return Err(EngineError::NotFound(requested));
    }

    // One winner per canonical slot. The already-canonical form beats the
    // legacy-duplicated form regardless of input order; equal forms are
    // broken by reconciliation order (last wins).
    let mut slots: Vec<Slot<'_>> = Vec::with_capacity(scoped.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(scoped.len());
    let mut stale: Vec<StaleRow> = Vec::new();

    for entry in scoped {
        let ns = normalize_namespace(&entry.namespace);
        let (slot_path, was_canonical) = if ns == *shared {
            let canonical = canonical_path(shared, &entry.path);
            let was_canonical = canonical == entry.path;
            (format!("{shared}.{canonical}"), was_canonical)
        } else {
            let canonical = canonical_path(&requested, &entry.path);
            let was_canonical = canonical == entry.path;
            (canonical, was_canonical)
        };

        match index.get(&slot_path).copied() {
            None => {
                index.insert(slot_path.clone(), slots.len());
                slots.push(Slot {
                    path: slot_path,
                    entry,
                    was_canonical,
                });
            }
            Some(at) => {
                let existing = &mut slots[at];
                if existing.was_canonical && !was_canonical {
                    // Incoming legacy duplicate loses
                    stale.push(StaleRow {
                        namespace: entry.namespace.clone(),
                        path: entry.path.clone(),
                    });
                } else {
                    if !existing.was_canonical && was_canonical {
                        stale.push(StaleRow {
                            namespace: existing.entry.namespace.clone(),
                            path: existing.entry.path.clone(),
                        });
                    }
                    existing.entry = entry;
                    existing.was_canonical = was_canonical;
                }
            }
        }
    }

    let parsed = slots.into_iter().filter_map(|slot| {
        match Path::parse(&slot.path) {
            Ok(path) if !path.is_empty() => Some((path, slot.entry.value.clone())),
            _ => {
                tracing::debug!(path = %slot.path, "skipping row with unusable path");
                None
            }
        }
    });
    let mut document = build_document(parsed, &config.primary_locale);

    if let Some(overlay) = shared_overlay {
        if let Value::Object(root) = &mut document {
            for section in &config.overlay_sections {
                if let Some(subtree) = overlay.get(section) {
                    root.insert(section.clone(), subtree.clone());
                }
            }
        }
    }

    Ok(Reconciled { document, stale })
}

/// Store-coupled reconciliation service.
///
/// Selects a page's rows and the shared overlay, reconciles, then
/// best-effort deletes any stale legacy rows the reconciliation exposed.
pub struct ContentService {
    store: Arc<dyn RowStore>,
    config: EngineConfig,
}

impl ContentService {
    /// Create a service over a row store.
    pub fn new(store: Arc<dyn RowStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce the canonical document for a page.
    ///
    /// Returns `NotFound` only when the page has no rows at all; an empty
    /// document after merging is still a present document. An overlay
    /// lookup failure is absorbed and the page is served without it.
    pub async fn page_document(&self, namespace: &str) -> Result<Value, EngineError> {
        let requested = normalize_namespace(namespace);
        let rows = self
            .store
            .select_rows(&[requested.as_str(), self.config.shared_namespace.as_str()])
            .await?;

        let overlay = match self.store.select_shared_overlay().await {
            Ok(overlay) => overlay,
            Err(err) => {
                tracing::warn!(error = %err, "shared overlay lookup failed; serving page without it");
                None
            }
        };

        let reconciled = reconcile(&requested, &rows, overlay.as_ref(), &self.config)?;

        for row in &reconciled.stale {
            if let Err(err) = self.store.delete_row(&row.namespace, &row.path).await {
                tracing::warn!(
                    namespace = %row.namespace,
                    path = %row.path,
                    error = %err,
                    "failed to delete stale legacy row"
                );
            }
        }

        Ok(reconciled.document)
    }
}
