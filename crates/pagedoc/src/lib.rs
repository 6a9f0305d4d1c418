//! Path-addressed sparse document engine.
//!
//! Pages store editable text as individually addressable entries keyed by
//! dotted/array-indexed paths (`hero.cards[2].title`) instead of one JSON
//! blob per page. This crate is the pure core of that model:
//!
//! - **Path codec**: parse/serialize the wire path grammar ([`Path`], [`Seg`])
//! - **Document builder**: unordered flat rows → nested tree ([`build_document`])
//! - **Document flattener**: nested tree → flat rows ([`flatten_document`])
//! - **Partial updates**: sanitized single-path writes ([`apply_edit`])
//! - **Style grouping codec**: per-path CSS rows → stylesheet ([`render_stylesheet`])
//! - **Change bus**: per-process namespace pub/sub ([`ChangeBus`])
//!
//! Everything here is synchronous, CPU-bound tree and string manipulation.
//! The row-store collaborator, namespace reconciliation, and the
//! store-backed editor live in `pagedoc-store`.
//!
//! # Round-trip invariant
//!
//! For documents without locale-map-shaped interior objects,
//! `build_document(flatten_document(doc)) == doc`:
//!
//! ```
//! use pagedoc::{build_document, flatten_document, Path};
//! use serde_json::json;
//!
//! let doc = json!({"hero": {"title": "Welcome", "cards": [{"label": "one"}]}});
//! let rows = flatten_document(&doc, "en")
//!     .into_iter()
//!     .map(|(p, v)| (Path::parse(&p).unwrap(), v));
//! assert_eq!(build_document(rows, "en"), doc);
//! ```

mod build;
mod edit;
mod error;
mod events;
mod flatten;
mod path;
mod style;
mod value;

pub use build::{build_document, get_at_path};
pub use edit::{apply_edit, apply_edits, EditOutcome};
pub use error::{value_type_name, DocError, DocResult};
pub use events::{ChangeBus, Subscription};
pub use flatten::flatten_document;
pub use path::{Path, Seg};
pub use style::{render_stylesheet, Breakpoint, StyleRow};
pub use value::{sanitize_text, LocalizedText};
