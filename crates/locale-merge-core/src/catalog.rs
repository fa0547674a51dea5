// crates/locale-merge-core/src/catalog.rs
// ============================================================================
// Module: Locale Merge Catalog Model
// Description: Ordered message catalogs and validated language codes.
// Purpose: Provide typed wrappers over key-ordered JSON catalog documents.
// Dependencies: serde, serde_json (preserve_order, arbitrary_precision)
// ============================================================================

//! ## Overview
//! A [`Catalog`] is the top-level JSON object of a `messages.json` file: keys
//! are stable message identifiers and values are message entries. Key order is
//! the order of the source document and is never re-sorted.
//!
//! A [`LanguageCode`] names both a locale directory and a locale. It is
//! validated at discovery time so it can be joined onto paths safely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Entry field compared when deciding whether an override replaces a base entry.
pub const MESSAGE_FIELD: &str = "message";

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Key-ordered message catalog.
///
/// # Invariants
/// - Iteration order is insertion order; new keys are appended at the end.
/// - Replacing the value of an existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing ordered map.
    #[must_use]
    pub const fn from_map(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Builds a catalog from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns the original value when the document is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(entries) => Ok(Self(entries)),
            other => Err(other),
        }
    }

    /// Returns the number of message keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the catalog has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the entry stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Inserts an entry, appending new keys and replacing existing ones in place.
    pub fn insert(&mut self, key: impl Into<String>, entry: Value) -> Option<Value> {
        self.0.insert(key.into(), entry)
    }

    /// Iterates over keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(key, entry)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Returns the underlying ordered map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the catalog and returns it as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Catalog {
    fn from(entries: Map<String, Value>) -> Self {
        Self::from_map(entries)
    }
}

// ============================================================================
// SECTION: Language Codes
// ============================================================================

/// Errors raised when a directory name cannot be used as a language code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageCodeError {
    /// The name is empty.
    #[error("language code must be non-empty")]
    Empty,
    /// The name is a relative path marker.
    #[error("language code must not be '.' or '..'")]
    RelativeMarker,
    /// The name contains a path separator or NUL byte.
    #[error("language code {0} contains a path separator")]
    Separator(String),
}

/// Language code naming a locale directory (for example `en` or `pt_BR`).
///
/// # Invariants
/// - Non-empty, not `.` or `..`, and free of path separators.
/// - Otherwise opaque: no case folding or region normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validates a directory name as a language code.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageCodeError`] when the name is not a single path component.
    pub fn parse(value: &str) -> Result<Self, LanguageCodeError> {
        if value.is_empty() {
            return Err(LanguageCodeError::Empty);
        }
        if value == "." || value == ".." {
            return Err(LanguageCodeError::RelativeMarker);
        }
        if value.contains(['/', '\\', '\0']) {
            return Err(LanguageCodeError::Separator(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
