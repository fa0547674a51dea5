// crates/locale-merge-core/src/error.rs
// ============================================================================
// Module: Locale Merge Errors
// Description: Error taxonomy for the locale merge step.
// Purpose: Classify resource, format, and drift failures with file context.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every failure of the merge step is fatal to the run. [`MergeError`]
//! carries the path or language that failed so callers can render a precise
//! diagnostic; [`MergeError::class`] groups variants into the three classes
//! surfaced to users.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::LanguageCodeError;
use crate::merge::EntryShapeError;

// ============================================================================
// SECTION: Error Class
// ============================================================================

/// Coarse failure classes for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing, unreadable, oversized, or unwritable files and directories.
    Resource,
    /// Inputs that are not valid catalog documents.
    Format,
    /// Check mode found outputs that differ from a fresh merge.
    Drift,
}

// ============================================================================
// SECTION: Merge Error
// ============================================================================

/// Errors returned by the merge step.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An override tree could not be listed.
    #[error("failed to list locale tree {}: {error}", .path.display())]
    Discovery {
        /// Tree root being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },
    /// A directory in an override tree is not a usable language code.
    #[error("invalid language directory {}: {error}", .path.display())]
    InvalidLanguage {
        /// Offending directory.
        path: PathBuf,
        /// Validation failure.
        #[source]
        error: LanguageCodeError,
    },
    /// A directory name in an override tree is not valid UTF-8.
    #[error("language directory {} is not valid UTF-8", .path.display())]
    NonUtf8Language {
        /// Offending directory.
        path: PathBuf,
    },
    /// A catalog file could not be read.
    #[error("failed to read catalog {}: {error}", .path.display())]
    Read {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },
    /// A catalog file exceeds the configured size limit.
    #[error("catalog {} is {size} bytes (limit {limit})", .path.display())]
    TooLarge {
        /// Catalog path.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// A catalog file is not valid JSON.
    #[error("failed to parse catalog {}: {error}", .path.display())]
    Parse {
        /// Catalog path.
        path: PathBuf,
        /// Parser error (carries line and column).
        #[source]
        error: serde_json::Error,
    },
    /// A catalog document is valid JSON but not an object.
    #[error("catalog {} must be a JSON object", .path.display())]
    NotAnObject {
        /// Catalog path.
        path: PathBuf,
    },
    /// A shared key could not be compared.
    #[error("cannot merge {} into {language}: {error}", .path.display())]
    EntryShape {
        /// Language being merged.
        language: String,
        /// Override catalog being applied.
        path: PathBuf,
        /// Entry failure.
        #[source]
        error: EntryShapeError,
    },
    /// The merged catalog could not be serialized.
    #[error("failed to render merged catalog for {language}: {error}")]
    Render {
        /// Language being rendered.
        language: String,
        /// Serializer error.
        #[source]
        error: serde_json::Error,
    },
    /// The merged catalog could not be written.
    #[error("failed to write catalog {}: {error}", .path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },
    /// Check mode found stale or missing outputs.
    #[error("merged catalogs are out of date for: {}", .languages.join(", "))]
    Drift {
        /// Languages whose outputs differ from a fresh merge.
        languages: Vec<String>,
    },
    /// The progress observer failed.
    #[error("failed to record merge progress: {0}")]
    Observer(String),
}

impl MergeError {
    /// Returns the reporting class of the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Discovery {
                ..
            }
            | Self::Read {
                ..
            }
            | Self::TooLarge {
                ..
            }
            | Self::Write {
                ..
            }
            | Self::Observer(_) => ErrorClass::Resource,
            Self::InvalidLanguage {
                ..
            }
            | Self::NonUtf8Language {
                ..
            }
            | Self::Parse {
                ..
            }
            | Self::NotAnObject {
                ..
            }
            | Self::EntryShape {
                ..
            }
            | Self::Render {
                ..
            } => ErrorClass::Format,
            Self::Drift {
                ..
            } => ErrorClass::Drift,
        }
    }
}
