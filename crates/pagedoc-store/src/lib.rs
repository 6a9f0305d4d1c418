//! Row store contract, adapters, and store-coupled services for the
//! path-addressed document engine.
//!
//! The pure tree/string machinery lives in the `pagedoc` crate; this crate
//! adds the persistence seam and the two services that touch it:
//!
//! - [`RowStore`]: the async collaborator contract, keyed by
//!   `(namespace, path)`, with [`MemoryRowStore`] and [`FileRowStore`]
//!   adapters
//! - [`ContentService`]: namespace reconciliation, merging page rows with
//!   the shared namespace and overlay while deduplicating legacy key forms
//! - [`Editor`]: the store-backed partial update engine, applying sanitized
//!   sequential edits with legacy-row cleanup
//!
//! Store calls are the only suspension points; each edit's cleanup is
//! awaited before the next edit begins, and a timed-out batch leaves
//! already-applied edits committed (at-least-once, no rollback).

mod config;
mod editor;
mod error;
mod file;
mod memory;
mod reconcile;
mod store;

pub use config::EngineConfig;
pub use editor::{AppliedEdit, BatchReport, EditRequest, Editor, FailedEdit};
pub use error::EngineError;
pub use file::FileRowStore;
pub use memory::MemoryRowStore;
pub use reconcile::{
    canonical_path, normalize_namespace, reconcile, ContentService, Reconciled, StaleRow,
};
pub use store::{Entry, RowStore, StoreError};
