//! Document flattener: turns a nested tree back into flat (path, value) rows.
//!
//! The inverse of `build_document` for documents without locale-map-shaped
//! interior objects. Descent stops at objects that look like locale maps,
//! a deliberate, preserved wart of the row format (see `looks_like_locale_map`).

use crate::{LocalizedText, Path, Seg};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flatten a nested document into rows.
///
/// Array holes (`Null` slots) are skipped, not emitted. Bare string leaves
/// are wrapped under the primary locale; non-string scalars are stringified.
///
/// # Examples
///
/// ```
/// use pagedoc::flatten_document;
/// use serde_json::json;
///
/// let doc = json!({"items": [null, {"text": "x"}]});
/// let rows = flatten_document(&doc, "en");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].0, "items[1].text");
/// ```
pub fn flatten_document(doc: &Value, primary_locale: &str) -> Vec<(String, LocalizedText)> {
    let mut rows = Vec::new();
    let mut path = Path::root();
    walk(doc, &mut path, primary_locale, &mut rows);
    rows
}

fn walk(
    node: &Value,
    path: &mut Path,
    primary_locale: &str,
    rows: &mut Vec<(String, LocalizedText)>,
) {
    match node {
        Value::Object(map) => {
            if let Some(leaf) = as_locale_map(map) {
                rows.push((path.to_string(), LocalizedText::Map(leaf)));
                return;
            }
            for (key, child) in map {
                path.push(Seg::key(key));
                walk(child, path, primary_locale, rows);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                // Null slots are holes, not values
                if child.is_null() {
                    continue;
                }
                path.push(Seg::index(idx));
                walk(child, path, primary_locale, rows);
                path.pop();
            }
        }
        Value::Null => {}
        Value::String(s) => rows.push((
            path.to_string(),
            LocalizedText::with_locale(primary_locale, s),
        )),
        other => rows.push((
            path.to_string(),
            LocalizedText::with_locale(primary_locale, other.to_string()),
        )),
    }
}

/// Heuristic: does this key look like a locale code?
///
/// True when the key contains a hyphen (`en-US`) or is a 2-letter ASCII
/// alphabetic code (`en`).
fn is_locale_code(key: &str) -> bool {
    key.contains('-') || (key.len() == 2 && key.bytes().all(|b| b.is_ascii_alphabetic()))
}

/// Treat an object as a terminal translation map when any key is
/// locale-code-shaped.
///
/// Known sharp edge: a genuine nested object that happens to carry a
/// locale-shaped key (say `"id"`, or anything hyphenated) is misclassified
/// as a leaf and its non-string values are dropped. Preserved for
/// compatibility with the stored row format; do not "fix".
fn as_locale_map(map: &Map<String, Value>) -> Option<BTreeMap<String, String>> {
    if !map.keys().any(|k| is_locale_code(k)) {
        return None;
    }
    Some(
        map.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_owned())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let doc = json!({"hero": {"title": "A", "subtitle": "B"}});
        let rows = flatten_document(&doc, "en");
        assert_eq!(
            rows,
            vec![
                ("hero.subtitle".to_owned(), LocalizedText::with_locale("en", "B")),
                ("hero.title".to_owned(), LocalizedText::with_locale("en", "A")),
            ]
        );
    }

    #[test]
    fn test_flatten_skips_holes() {
        let doc = json!({"items": [null, {"text": "x"}]});
        let rows = flatten_document(&doc, "en");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "items[1].text");
    }

    #[test]
    fn test_flatten_array_paths() {
        let doc = json!({"cards": [{"title": "one"}, {"title": "two"}]});
        let paths: Vec<_> = flatten_document(&doc, "en")
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(paths, vec!["cards[0].title", "cards[1].title"]);
    }

    #[test]
    fn test_flatten_locale_map_is_terminal() {
        let doc = json!({"greeting": {"en": "Hi", "de": "Hallo"}});
        let rows = flatten_document(&doc, "en");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "greeting");
        assert_eq!(rows[0].1.resolve("de"), Some("Hallo"));
    }

    #[test]
    fn test_flatten_hyphenated_key_is_terminal() {
        let doc = json!({"label": {"en-US": "color", "en-GB": "colour"}});
        let rows = flatten_document(&doc, "en-US");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.resolve("en-GB"), Some("colour"));
    }

    #[test]
    fn test_flatten_locale_shaped_key_misclassifies() {
        // Known wart: "id" is 2-letter alphabetic, so this object is treated
        // as a translation map and the numeric value is dropped.
        let doc = json!({"card": {"id": "c1", "count": 3}});
        let rows = flatten_document(&doc, "en");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "card");
        assert_eq!(rows[0].1, LocalizedText::with_locale("id", "c1"));
    }

    #[test]
    fn test_flatten_stringifies_scalars() {
        let doc = json!({"count": 3, "live": true});
        let rows = flatten_document(&doc, "en");
        assert_eq!(
            rows,
            vec![
                ("count".to_owned(), LocalizedText::with_locale("en", "3")),
                ("live".to_owned(), LocalizedText::with_locale("en", "true")),
            ]
        );
    }

    #[test]
    fn test_flatten_empty_doc() {
        assert!(flatten_document(&json!({}), "en").is_empty());
    }
}
