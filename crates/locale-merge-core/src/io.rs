// crates/locale-merge-core/src/io.rs
// ============================================================================
// Module: Locale Merge Catalog I/O
// Description: Bounded catalog reads, ordered rendering, and output writes.
// Purpose: Move catalogs between disk and memory without reordering keys.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Catalog files are read with a hard size limit and parsed into key-ordered
//! [`Catalog`] values. Rendering uses a pretty formatter with a configurable
//! indent, writes non-ASCII text literally, and emits no trailing newline.
//! Writes never create directories: the output tree must already exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::catalog::Catalog;
use crate::error::MergeError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default indent width for rendered catalogs.
pub const DEFAULT_INDENT: usize = 4;
/// Default maximum catalog size in bytes.
pub const DEFAULT_MAX_CATALOG_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
pub enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`ReadLimitError`] when the file cannot be read or exceeds `max_bytes`.
pub fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Catalog Reads
// ============================================================================

/// Reads and parses a catalog file, keeping keys in file order.
///
/// # Errors
///
/// Returns [`MergeError::Read`] or [`MergeError::TooLarge`] for resource
/// failures, and [`MergeError::Parse`] or [`MergeError::NotAnObject`] when the
/// document is not a JSON object.
pub fn read_catalog(path: &Path, max_bytes: usize) -> Result<Catalog, MergeError> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => MergeError::Read {
            path: path.to_path_buf(),
            error,
        },
        ReadLimitError::TooLarge {
            size,
            limit,
        } => MergeError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        },
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|error| MergeError::Parse {
        path: path.to_path_buf(),
        error,
    })?;
    Catalog::from_value(value).map_err(|_| MergeError::NotAnObject {
        path: path.to_path_buf(),
    })
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a catalog as pretty JSON with `indent` spaces per level.
///
/// Keys keep catalog order, non-ASCII characters are written literally, and no
/// trailing newline is appended.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_catalog(catalog: &Catalog, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    let indent_bytes = vec![b' '; indent];
    let formatter = PrettyFormatter::with_indent(&indent_bytes);
    let mut bytes = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut bytes, formatter);
    catalog.serialize(&mut serializer)?;
    Ok(bytes)
}

// ============================================================================
// SECTION: Writes
// ============================================================================

/// Writes rendered catalog bytes to `path` without creating parent directories.
///
/// # Errors
///
/// Returns [`MergeError::Write`] when the file cannot be created or written.
pub fn write_catalog(path: &Path, bytes: &[u8]) -> Result<(), MergeError> {
    fs::write(path, bytes).map_err(|error| MergeError::Write {
        path: path.to_path_buf(),
        error,
    })
}

/// Returns true when `path` already holds exactly `bytes`.
///
/// A missing file compares as different; other read failures are errors.
///
/// # Errors
///
/// Returns [`MergeError::Read`] when an existing file cannot be read.
pub fn output_matches(path: &Path, bytes: &[u8]) -> Result<bool, MergeError> {
    match fs::read(path) {
        Ok(existing) => Ok(existing == bytes),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(MergeError::Read {
            path: path.to_path_buf(),
            error,
        }),
    }
}
