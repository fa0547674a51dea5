// crates/locale-merge-core/src/merge.rs
// ============================================================================
// Module: Locale Merge Algorithm
// Description: Override-wins merging of ordered message catalogs.
// Purpose: Combine a base catalog with one or more override layers key-by-key.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`merge_catalog`] applies a single override catalog on top of a base
//! catalog in place. [`merge_layers`] folds an ordered sequence of overrides
//! over the same base, so later layers win over earlier ones.
//!
//! ## Invariants
//! - The merged key set is the union of the base and override key sets.
//! - Base keys keep their position; override-only keys are appended in
//!   override order.
//! - A shared key is updated only when the `message` values differ. The update
//!   is a shallow field merge: override fields replace same-named base fields
//!   and base-only fields survive.
//! - A shared key with equal `message` values keeps the base entry untouched,
//!   even when other fields differ.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::catalog::MESSAGE_FIELD;

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Counts of how override keys were applied.
///
/// # Invariants
/// - `added + updated + retained` equals the number of override keys applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Override-only keys appended to the base catalog.
    pub added: usize,
    /// Shared keys whose `message` differed and were shallow-merged.
    pub updated: usize,
    /// Shared keys whose `message` matched and were left untouched.
    pub retained: usize,
}

impl MergeSummary {
    /// Returns the number of override keys this summary covers.
    #[must_use]
    pub const fn total(self) -> usize {
        self.added + self.updated + self.retained
    }

    /// Adds the counts from another summary.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        Self {
            added: self.added + other.added,
            updated: self.updated + other.updated,
            retained: self.retained + other.retained,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Which side of a merge an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSide {
    /// The accumulated base catalog.
    Base,
    /// The override catalog being applied.
    Override,
}

impl CatalogSide {
    /// Returns a stable label for the side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for CatalogSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared key whose entries cannot be compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryShapeError {
    /// The entry is not a JSON object.
    #[error("entry '{key}' in the {side} catalog is not an object")]
    NotAnObject {
        /// Message key.
        key: String,
        /// Catalog the entry came from.
        side: CatalogSide,
    },
    /// The entry has no `message` field.
    #[error("entry '{key}' in the {side} catalog has no message field")]
    MissingMessage {
        /// Message key.
        key: String,
        /// Catalog the entry came from.
        side: CatalogSide,
    },
}

/// Failure while folding override layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("override layer {layer}: {error}")]
pub struct LayerMergeError {
    /// Zero-based index of the failing layer.
    pub layer: usize,
    /// Underlying entry failure.
    #[source]
    pub error: EntryShapeError,
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Merges `overlay` into `base` in place.
///
/// # Errors
///
/// Returns [`EntryShapeError`] when a key present in both catalogs maps to a
/// non-object entry or an entry without a `message` field. Keys processed
/// before the failure stay merged.
pub fn merge_catalog(
    base: &mut Catalog,
    overlay: &Catalog,
) -> Result<MergeSummary, EntryShapeError> {
    let mut summary = MergeSummary::default();
    for (key, overlay_entry) in overlay.iter() {
        let Some(base_entry) = base.get_mut(key) else {
            base.insert(key, overlay_entry.clone());
            summary.added += 1;
            continue;
        };
        let base_fields = object_fields_mut(base_entry, key, CatalogSide::Base)?;
        let overlay_fields = object_fields(overlay_entry, key, CatalogSide::Override)?;
        let base_message = message_of(base_fields, key, CatalogSide::Base)?;
        let overlay_message = message_of(overlay_fields, key, CatalogSide::Override)?;
        if base_message == overlay_message {
            summary.retained += 1;
            continue;
        }
        for (field, value) in overlay_fields {
            base_fields.insert(field.clone(), value.clone());
        }
        summary.updated += 1;
    }
    Ok(summary)
}

/// Folds an ordered sequence of override layers over `base`.
///
/// With a single layer this is exactly [`merge_catalog`].
///
/// # Errors
///
/// Returns [`LayerMergeError`] naming the first layer whose entries cannot be
/// compared. Layers before it stay applied.
pub fn merge_layers<'a, I>(
    base: &mut Catalog,
    layers: I,
) -> Result<MergeSummary, LayerMergeError>
where
    I: IntoIterator<Item = &'a Catalog>,
{
    layers.into_iter().enumerate().try_fold(MergeSummary::default(), |summary, (layer, overlay)| {
        merge_catalog(base, overlay)
            .map(|applied| summary.combine(applied))
            .map_err(|error| LayerMergeError {
                layer,
                error,
            })
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the fields of an object entry.
fn object_fields<'a>(
    entry: &'a Value,
    key: &str,
    side: CatalogSide,
) -> Result<&'a Map<String, Value>, EntryShapeError> {
    entry.as_object().ok_or_else(|| EntryShapeError::NotAnObject {
        key: key.to_string(),
        side,
    })
}

/// Returns the mutable fields of an object entry.
fn object_fields_mut<'a>(
    entry: &'a mut Value,
    key: &str,
    side: CatalogSide,
) -> Result<&'a mut Map<String, Value>, EntryShapeError> {
    entry.as_object_mut().ok_or_else(|| EntryShapeError::NotAnObject {
        key: key.to_string(),
        side,
    })
}

/// Returns the `message` field of an entry.
fn message_of<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    side: CatalogSide,
) -> Result<&'a Value, EntryShapeError> {
    fields.get(MESSAGE_FIELD).ok_or_else(|| EntryShapeError::MissingMessage {
        key: key.to_string(),
        side,
    })
}
