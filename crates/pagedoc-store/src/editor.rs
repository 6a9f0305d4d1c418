//! Store-backed partial update engine.
//!
//! Applies a batch of single-path edits against the row store: sanitize,
//! route to the page or shared namespace, upsert the canonical row, then
//! clean up the superseded legacy-duplicated row. Edits run strictly one
//! at a time so a concurrent reader never observes an interleaved
//! write/cleanup pair.

use crate::reconcile::{canonical_path, normalize_namespace};
use crate::{EngineConfig, RowStore};
use pagedoc::{sanitize_text, ChangeBus, LocalizedText, Path};
use serde::Deserialize;
use std::sync::Arc;

/// One requested edit: a wire path and the raw (unsanitized) value.
#[derive(Clone, Debug, Deserialize)]
pub struct EditRequest {
    /// Wire path, possibly legacy-prefixed or shared-marked.
    pub path: String,
    /// Raw text; HTML-tag-shaped substrings are stripped before storage.
    pub value: String,
}

impl EditRequest {
    /// Create an edit request.
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// A successfully applied edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedEdit {
    /// Namespace the row was written under.
    pub namespace: String,
    /// Canonical path of the written row.
    pub path: String,
    /// The sanitized value that was stored.
    pub value: String,
}

/// An edit that could not be applied; the batch continued without it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedEdit {
    /// The requested path as given.
    pub path: String,
    /// Why the edit failed.
    pub error: String,
}

/// Partial-success tally for one batch of edits.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Edits whose canonical rows were written.
    pub applied: Vec<AppliedEdit>,
    /// Edits that failed; later edits still ran.
    pub failed: Vec<FailedEdit>,
}

impl BatchReport {
    /// True when every edit in the batch was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Store-backed editor applying sanitized single-path updates.
pub struct Editor {
    store: Arc<dyn RowStore>,
    config: EngineConfig,
    bus: Option<Arc<ChangeBus>>,
}

impl Editor {
    /// Create an editor over a row store.
    pub fn new(store: Arc<dyn RowStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            bus: None,
        }
    }

    /// Publish touched namespaces on a change bus after each batch.
    pub fn with_change_bus(mut self, bus: Arc<ChangeBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Apply a batch of edits for a page, strictly in order.
    ///
    /// Per edit: sanitize the value; a path carrying the shared-namespace
    /// marker prefix routes to the shared namespace (marker stripped),
    /// otherwise the page namespace with any self-referential duplicate
    /// prefix stripped. The canonical `(namespace, path)` row is upserted
    /// and the legacy-duplicated row deleted as a follow-up; cleanup
    /// failure is logged, not surfaced, since the canonical write already
    /// landed. A store failure aborts only the offending edit.
    pub async fn apply_batch(&self, namespace: &str, edits: &[EditRequest]) -> BatchReport {
        let page_ns = normalize_namespace(namespace);
        let shared = &self.config.shared_namespace;
        let marker = format!("{shared}.");
        let mut report = BatchReport::default();

        for edit in edits {
            let clean = sanitize_text(&edit.value);

            let (target_ns, canonical, observed_legacy) =
                match edit.path.strip_prefix(marker.as_str()) {
                    Some(rest) => (shared.clone(), rest.to_owned(), None),
                    None => {
                        let canonical = canonical_path(&page_ns, &edit.path);
                        // Prefix stripping is case-insensitive, so the stored
                        // legacy key may differ from its reconstruction
                        let observed = (canonical != edit.path).then(|| edit.path.clone());
                        (page_ns.clone(), canonical, observed)
                    }
                };

            if let Err(err) = Path::parse(&canonical) {
                report.failed.push(FailedEdit {
                    path: edit.path.clone(),
                    error: err.to_string(),
                });
                continue;
            }

            let value = LocalizedText::with_locale(&self.config.primary_locale, clean.as_str());
            if let Err(err) = self.store.upsert_row(&target_ns, &canonical, &value).await {
                report.failed.push(FailedEdit {
                    path: edit.path.clone(),
                    error: err.to_string(),
                });
                continue;
            }

            // Legacy-duplicated forms are stale once the canonical write
            // lands: the key the edit actually arrived under (if it was
            // prefixed) plus the lowercase reconstruction. Deletion is
            // idempotent, so no existence check.
            let mut stale = vec![format!("{target_ns}.{canonical}")];
            if let Some(observed) = observed_legacy {
                if !stale.contains(&observed) {
                    stale.push(observed);
                }
            }
            for legacy in &stale {
                if let Err(err) = self.store.delete_row(&target_ns, legacy).await {
                    tracing::warn!(
                        namespace = %target_ns,
                        path = %legacy,
                        error = %err,
                        "failed to delete legacy duplicate row"
                    );
                }
            }

            report.applied.push(AppliedEdit {
                namespace: target_ns,
                path: canonical,
                value: clean,
            });
        }

        if let Some(bus) = &self.bus {
            let mut published: Vec<&str> = Vec::new();
            for applied in &report.applied {
                if !published.contains(&applied.namespace.as_str()) {
                    published.push(&applied.namespace);
                    bus.publish(&applied.namespace);
                }
            }
        }

        report
    }
}
