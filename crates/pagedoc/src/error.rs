//! Error types for document engine operations.

use crate::Path;
use thiserror::Error;

/// Result type alias for document engine operations.
pub type DocResult<T> = Result<T, DocError>;

/// Errors that can occur while parsing paths or manipulating documents.
#[derive(Debug, Error)]
pub enum DocError {
    /// Path string could not be parsed.
    #[error("malformed path: {path:?}")]
    MalformedPath {
        /// The offending path string.
        path: String,
    },

    /// A path implies one container shape where another value exists.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The path where the mismatch occurred.
        path: Path,
        /// The expected type.
        expected: &'static str,
        /// The actual type found.
        found: &'static str,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocError {
    /// Create a malformed path error.
    #[inline]
    pub fn malformed_path(path: impl Into<String>) -> Self {
        DocError::MalformedPath { path: path.into() }
    }

    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(path: Path, expected: &'static str, found: &'static str) -> Self {
        DocError::TypeMismatch {
            path,
            expected,
            found,
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
