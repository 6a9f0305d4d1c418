//! In-memory partial updates: write one sanitized value at one path.
//!
//! This is the pure half of the partial update engine; the store-backed
//! half (row upsert plus legacy cleanup) lives in `pagedoc-store`.

use crate::build::{get_at_path, insert_leaf};
use crate::error::DocResult;
use crate::value::sanitize_text;
use crate::{DocError, Path};
use serde_json::Value;

/// Result of a successful single-path edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// The canonical path that was written.
    pub updated_path: String,
    /// The string value previously stored at that path, if any.
    pub previous_value: Option<String>,
}

/// Apply a single sanitized edit to an in-memory document.
///
/// The raw value is stripped of every `<...>` substring, then written at
/// the parsed path, creating intermediate containers as the builder does.
/// A scalar blocking the walk surfaces as a `TypeMismatch` result rather
/// than a panic, so bulk callers can continue with remaining edits.
///
/// # Examples
///
/// ```
/// use pagedoc::apply_edit;
/// use serde_json::json;
///
/// let mut doc = json!({"items": [{}, {}, {}]});
/// let outcome = apply_edit(&mut doc, "items[2].text", "<b>Hi</b>").unwrap();
/// assert_eq!(outcome.updated_path, "items[2].text");
/// assert_eq!(doc["items"][2]["text"], json!("Hi"));
/// ```
pub fn apply_edit(doc: &mut Value, path: &str, raw_value: &str) -> DocResult<EditOutcome> {
    let parsed = Path::parse(path)?;
    if parsed.is_empty() {
        return Err(DocError::malformed_path(path));
    }
    let clean = sanitize_text(raw_value);
    let previous = get_at_path(doc, &parsed)
        .and_then(Value::as_str)
        .map(str::to_owned);
    insert_leaf(doc, parsed.segments(), &parsed, Value::String(clean))?;
    Ok(EditOutcome {
        updated_path: parsed.to_string(),
        previous_value: previous,
    })
}

/// Apply a batch of edits sequentially, reporting each outcome.
///
/// A failed edit never aborts the batch; its slot carries the error and
/// later edits still run in order.
pub fn apply_edits<'a, I>(doc: &mut Value, edits: I) -> Vec<DocResult<EditOutcome>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    edits
        .into_iter()
        .map(|(path, raw)| apply_edit(doc, path, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_edit_strips_tags() {
        let mut doc = json!({"items": [{}, {}, {}]});
        let outcome = apply_edit(&mut doc, "items[2].text", "<b>Hi</b>").unwrap();
        assert_eq!(outcome.updated_path, "items[2].text");
        assert_eq!(outcome.previous_value, None);
        assert_eq!(doc["items"][2]["text"], json!("Hi"));
        // Neighbouring slots are untouched
        assert_eq!(doc["items"][0], json!({}));
        assert_eq!(doc["items"][1], json!({}));
    }

    #[test]
    fn test_apply_edit_reports_previous_value() {
        let mut doc = json!({"hero": {"title": "old"}});
        let outcome = apply_edit(&mut doc, "hero.title", "new").unwrap();
        assert_eq!(outcome.previous_value.as_deref(), Some("old"));
        assert_eq!(doc["hero"]["title"], json!("new"));
    }

    #[test]
    fn test_apply_edit_creates_intermediates() {
        let mut doc = json!({});
        apply_edit(&mut doc, "a.b", "1").unwrap();
        apply_edit(&mut doc, "a.c", "2").unwrap();
        assert_eq!(doc, json!({"a": {"b": "1", "c": "2"}}));
    }

    #[test]
    fn test_apply_edit_type_mismatch_is_result() {
        let mut doc = json!({"a": "scalar"});
        let err = apply_edit(&mut doc, "a.b.c", "x").unwrap_err();
        assert!(matches!(err, DocError::TypeMismatch { .. }));
    }

    #[test]
    fn test_apply_edit_empty_path() {
        let mut doc = json!({});
        let err = apply_edit(&mut doc, "", "x").unwrap_err();
        assert!(matches!(err, DocError::MalformedPath { .. }));
    }

    #[test]
    fn test_apply_edits_continues_after_failure() {
        let mut doc = json!({"a": "scalar"});
        let results = apply_edits(&mut doc, vec![("a.b", "1"), ("ok", "2")]);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert_eq!(doc["ok"], json!("2"));
    }

    #[test]
    fn test_apply_edits_order_independent_for_disjoint_paths() {
        let mut forward = json!({});
        let mut reverse = json!({});
        apply_edits(&mut forward, vec![("a.b", "1"), ("a.c", "2")]);
        apply_edits(&mut reverse, vec![("a.c", "2"), ("a.b", "1")]);
        assert_eq!(forward, reverse);
        assert_eq!(forward, json!({"a": {"b": "1", "c": "2"}}));
    }
}
