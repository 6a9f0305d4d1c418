//! Document builder: reconstructs a nested tree from flat (path, value) rows.
//!
//! Rows arrive unordered; the builder allocates intermediate objects and
//! arrays on demand. Sparse array slots are padded with `Value::Null` holes,
//! which are never emitted back as rows (see `flatten`).

use crate::error::{value_type_name, DocError, DocResult};
use crate::{LocalizedText, Path, Seg};
use serde_json::{Map, Value};

/// Build a nested document from flat rows scoped to one document.
///
/// Each leaf is resolved to a single string via the primary locale. The
/// last writer for an identical path wins. A row whose path does not fit
/// the tree (e.g. indexing into a scalar) is logged and omitted; it never
/// aborts the build or corrupts the tree.
///
/// # Examples
///
/// ```
/// use pagedoc::{build_document, LocalizedText, Path};
/// use serde_json::json;
///
/// let rows = vec![
///     (Path::parse("hero.title").unwrap(), LocalizedText::plain("Welcome")),
///     (Path::parse("items[1].text").unwrap(), LocalizedText::plain("second")),
/// ];
/// let doc = build_document(rows, "en");
/// assert_eq!(doc["hero"]["title"], json!("Welcome"));
/// assert_eq!(doc["items"][0], json!(null)); // hole
/// assert_eq!(doc["items"][1]["text"], json!("second"));
/// ```
pub fn build_document<I>(rows: I, primary_locale: &str) -> Value
where
    I: IntoIterator<Item = (Path, LocalizedText)>,
{
    let mut root = Value::Object(Map::new());
    for (path, value) in rows {
        if path.is_empty() {
            continue;
        }
        let Some(text) = value.resolve(primary_locale).map(str::to_owned) else {
            tracing::debug!(path = %path, "skipping row with empty localized value");
            continue;
        };
        if let Err(err) = insert_leaf(&mut root, path.segments(), &path, Value::String(text)) {
            tracing::debug!(path = %path, error = %err, "skipping row that does not fit the tree");
        }
    }
    root
}

/// Write a leaf value at a path, creating intermediate containers.
///
/// Key segments require (or create) objects; index segments require (or
/// create) arrays, padding sparse slots with `Null` holes. A scalar in the
/// way is a `TypeMismatch`.
pub(crate) fn insert_leaf(
    current: &mut Value,
    segments: &[Seg],
    full_path: &Path,
    value: Value,
) -> DocResult<()> {
    match segments {
        [] => {
            *current = value;
            Ok(())
        }
        [Seg::Key(key), rest @ ..] => {
            match current {
                Value::Null => *current = Value::Object(Map::new()),
                Value::Object(_) => {}
                other => {
                    return Err(DocError::type_mismatch(
                        full_path.clone(),
                        "object",
                        value_type_name(other),
                    ))
                }
            }
            let obj = current.as_object_mut().unwrap();

            if rest.is_empty() {
                obj.insert(key.clone(), value);
            } else {
                let entry = obj.entry(key.clone()).or_insert(Value::Null);
                insert_leaf(entry, rest, full_path, value)?;
            }
            Ok(())
        }
        [Seg::Index(idx), rest @ ..] => {
            match current {
                Value::Null => *current = Value::Array(Vec::new()),
                Value::Array(_) => {}
                other => {
                    return Err(DocError::type_mismatch(
                        full_path.clone(),
                        "array",
                        value_type_name(other),
                    ))
                }
            }
            let arr = current.as_array_mut().unwrap();

            if arr.len() <= *idx {
                arr.resize(*idx + 1, Value::Null);
            }

            if rest.is_empty() {
                arr[*idx] = value;
            } else {
                insert_leaf(&mut arr[*idx], rest, full_path, value)?;
            }
            Ok(())
        }
    }
}

/// Get a reference to a value at a path (for reading).
pub fn get_at_path<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = doc;
    for seg in path.segments() {
        match seg {
            Seg::Key(key) => {
                current = current.get(key)?;
            }
            Seg::Index(idx) => {
                current = current.get(idx)?;
            }
        }
    }
    Some(current)
}
