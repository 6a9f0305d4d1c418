//! Localized leaf values and text sanitization.
//!
//! Every persisted row carries a `LocalizedText`: either a bare string
//! (treated as the primary locale's value) or a locale-code → string map.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// A terminal text value keyed by locale.
///
/// The wire shape accepts a bare string (primary locale) or an object whose
/// keys are locale codes and values are strings.
///
/// # Examples
///
/// ```
/// use pagedoc::LocalizedText;
///
/// let plain: LocalizedText = serde_json::from_str("\"Welcome\"").unwrap();
/// assert_eq!(plain.resolve("en"), Some("Welcome"));
///
/// let map: LocalizedText = serde_json::from_str(r#"{"en": "Hi", "de": "Hallo"}"#).unwrap();
/// assert_eq!(map.resolve("de"), Some("Hallo"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// A bare string, owned by the primary locale.
    Plain(String),
    /// A locale-code → string map.
    Map(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Create a bare-string value.
    #[inline]
    pub fn plain(text: impl Into<String>) -> Self {
        LocalizedText::Plain(text.into())
    }

    /// Create a single-locale map value.
    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(locale.into(), text.into());
        LocalizedText::Map(map)
    }

    /// Resolve to a single string for the given primary locale.
    ///
    /// Falls back to the first available locale when the primary is absent.
    /// Returns `None` only for an empty locale map.
    pub fn resolve(&self, primary_locale: &str) -> Option<&str> {
        match self {
            LocalizedText::Plain(s) => Some(s),
            LocalizedText::Map(map) => map
                .get(primary_locale)
                .or_else(|| map.values().next())
                .map(String::as_str),
        }
    }

    /// Convert into a locale map, assigning a bare string to the primary locale.
    pub fn into_map(self, primary_locale: &str) -> BTreeMap<String, String> {
        match self {
            LocalizedText::Plain(s) => {
                let mut map = BTreeMap::new();
                map.insert(primary_locale.to_owned(), s);
                map
            }
            LocalizedText::Map(map) => map,
        }
    }

    /// Check whether this value carries no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            LocalizedText::Plain(_) => false,
            LocalizedText::Map(map) => map.is_empty(),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::plain(s)
    }
}

impl From<String> for LocalizedText {
    fn from(s: String) -> Self {
        LocalizedText::Plain(s)
    }
}

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Strip every HTML-tag-shaped substring (`<...>`) from the input.
///
/// This is a blunt filter with no entity awareness or allow-list: anything
/// between a `<` and the next `>` is removed, whether or not it is a real
/// tag. Unclosed `<` runs are kept as-is. The operation is idempotent.
pub fn sanitize_text(raw: &str) -> String {
    TAG_PATTERN.replace_all(raw, "").into_owned()
}
