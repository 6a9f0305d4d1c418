//! Path representation for addressing entries in a content document.
//!
//! Paths are sequences of segments that describe a location in a nested
//! document. Each segment is either a key (for objects) or an index (for
//! arrays). The wire form is dotted with bracketed indices attached to the
//! preceding key, e.g. `hero.cards[2].title`.

use crate::error::{DocError, DocResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single segment in a document path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object key access: `{"key": value}`
    Key(String),
    /// Array index access: `[index]`
    Index(usize),
}

impl Seg {
    /// Create a key segment.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    /// Create an index segment.
    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    /// Returns true if this is a key segment.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Seg::Key(_))
    }

    /// Returns true if this is an index segment.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    /// Get the key if this is a key segment.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A complete path into a document.
///
/// Paths are ordered sequences of segments. `parse` and `Display` are
/// inverses for canonical wire paths.
///
/// # Examples
///
/// ```
/// use pagedoc::Path;
///
/// let path = Path::parse("hero.cards[2].title").unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.to_string(), "hero.cards[2].title");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<Seg>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty path (alias for `new`).
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    /// Create a path from a vector of segments.
    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Parse a wire path string.
    ///
    /// Splits on `.`; a token ending in `[digits]` yields a key segment for
    /// the name followed by an index segment. Empty tokens are skipped.
    /// Only the empty string is malformed.
    pub fn parse(input: &str) -> DocResult<Path> {
        if input.is_empty() {
            return Err(DocError::malformed_path(input));
        }

        let mut segments = Vec::new();
        for token in input.split('.') {
            if token.is_empty() {
                continue;
            }
            match split_indexed(token) {
                Some((name, index)) => {
                    segments.push(Seg::Key(name.to_owned()));
                    segments.push(Seg::Index(index));
                }
                None => segments.push(Seg::Key(token.to_owned())),
            }
        }
        Ok(Path(segments))
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment and return self (builder pattern).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    /// Push a segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    /// Pop the last segment from the path.
    #[inline]
    pub fn pop(&mut self) -> Option<Seg> {
        self.0.pop()
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the first segment.
    #[inline]
    pub fn first(&self) -> Option<&Seg> {
        self.0.first()
    }

    /// Get the last segment.
    #[inline]
    pub fn last(&self) -> Option<&Seg> {
        self.0.last()
    }

    /// Join this path with another path.
    #[inline]
    pub fn join(&self, other: &Path) -> Path {
        let mut result = self.clone();
        result.0.extend(other.0.iter().cloned());
        result
    }

    /// Get the parent path (path without the last segment).
    #[inline]
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            let mut p = self.clone();
            p.pop();
            Some(p)
        }
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Seg> {
        self.0.iter()
    }
}

/// Split a `name[digits]` token into its key and index parts.
///
/// Returns `None` when the token does not end in a well-formed single
/// bracketed base-10 index, in which case the whole token is a key.
fn split_indexed(token: &str) -> Option<(&str, usize)> {
    let rest = token.strip_suffix(']')?;
    let open = rest.rfind('[')?;
    let (name, bracketed) = rest.split_at(open);
    let digits = &bracketed[1..];
    if name.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((name, digits.parse().ok()?))
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            match seg {
                Seg::Key(k) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
                Seg::Index(i) => write!(f, "[{i}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = Seg;
    type IntoIter = std::vec::IntoIter<Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = Seg;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Construct a `Path` from a sequence of segments.
///
/// # Examples
///
/// ```
/// use pagedoc::path;
///
/// // String literals become Key segments
/// let p = path!("hero", "title");
///
/// // Numbers become Index segments
/// let p = path!("cards", 2, "title");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::root();
        $(
            p.push($crate::path!(@seg $seg));
        )+
        p
    }};
    (@seg $seg:expr) => {
        $crate::Seg::from($seg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_keys() {
        let path = Path::parse("hero.title").unwrap();
        assert_eq!(path.segments(), &[Seg::key("hero"), Seg::key("title")]);
    }

    #[test]
    fn test_parse_indexed_token() {
        let path = Path::parse("hero.cards[2].title").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Seg::key("hero"),
                Seg::key("cards"),
                Seg::index(2),
                Seg::key("title"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_is_malformed() {
        let err = Path::parse("").unwrap_err();
        assert!(matches!(err, DocError::MalformedPath { .. }));
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let path = Path::parse("a..b").unwrap();
        assert_eq!(path.segments(), &[Seg::key("a"), Seg::key("b")]);
    }

    #[test]
    fn test_parse_non_numeric_bracket_is_key() {
        // `items[x]` does not match the index grammar; the whole token is a key
        let path = Path::parse("items[x]").unwrap();
        assert_eq!(path.segments(), &[Seg::key("items[x]")]);
    }

    #[test]
    fn test_parse_bare_bracket_is_key() {
        let path = Path::parse("[3]").unwrap();
        assert_eq!(path.segments(), &[Seg::key("[3]")]);
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["hero.title", "items[3]", "hero.cards[2].title", "a.b[0].c[12].d"] {
            let path = Path::parse(raw).unwrap();
            assert_eq!(path.to_string(), raw);
        }
    }

    #[test]
    fn test_path_macro() {
        let p = path!("cards", 2, "title");
        assert_eq!(p.len(), 3);
        assert_eq!(p[0], Seg::Key("cards".into()));
        assert_eq!(p[1], Seg::Index(2));
        assert_eq!(p[2], Seg::Key("title".into()));
        assert_eq!(p.to_string(), "cards[2].title");
    }

    #[test]
    fn test_path_parent() {
        let path = path!("hero", "title");
        let parent = path.parent().unwrap();
        assert_eq!(parent.segments(), &[Seg::key("hero")]);
        assert!(Path::root().parent().is_none());
    }

    #[test]
    fn test_path_from_str() {
        let path: Path = "items[1].text".parse().unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_path_serde() {
        let path = path!("cards", 0, "title");
        let json = serde_json::to_string(&path).unwrap();
        let parsed: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, parsed);
    }
}
