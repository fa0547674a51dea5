// crates/locale-merge-core/src/observer.rs
// ============================================================================
// Module: Locale Merge Progress Observers
// Description: Per-language progress hooks for the merge runner.
// Purpose: Keep successful runs silent by default while allowing opt-in logs.
// Dependencies: serde_json, std
// ============================================================================

//! ## Overview
//! The runner reports each processed language to a [`MergeObserver`].
//! [`NoopObserver`] discards reports; [`JsonLinesObserver`] writes one JSON
//! record per language to any writer (stderr in the CLI).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use serde_json::json;

use crate::runner::LanguageOutcome;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Receives a report for every language the runner finishes.
pub trait MergeObserver {
    /// Records the outcome for one language.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the report cannot be recorded.
    fn record_language(&self, outcome: &LanguageOutcome) -> Result<(), String>;
}

/// No-op observer.
///
/// # Invariants
/// - Reports are intentionally discarded.
pub struct NoopObserver;

impl MergeObserver for NoopObserver {
    fn record_language(&self, _outcome: &LanguageOutcome) -> Result<(), String> {
        Ok(())
    }
}

// ============================================================================
// SECTION: JSON Lines Observer
// ============================================================================

/// Observer writing one JSON object per line.
pub struct JsonLinesObserver<W: Write + Send> {
    /// Output writer for progress records.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesObserver<W> {
    /// Creates an observer over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the observer and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the writer mutex is poisoned.
    pub fn into_inner(self) -> Result<W, String> {
        self.writer.into_inner().map_err(|_| "progress writer mutex poisoned".to_string())
    }
}

impl<W: Write + Send> MergeObserver for JsonLinesObserver<W> {
    fn record_language(&self, outcome: &LanguageOutcome) -> Result<(), String> {
        let record = json!({
            "language": outcome.language,
            "status": outcome.status.as_str(),
            "base_keys": outcome.base_keys,
            "overlay_count": outcome.overlay_count,
            "merged_keys": outcome.merged_keys,
            "added": outcome.summary.added,
            "updated": outcome.summary.updated,
            "retained": outcome.summary.retained,
            "output": outcome.output.display().to_string(),
        });
        let mut guard =
            self.writer.lock().map_err(|_| "progress writer mutex poisoned".to_string())?;
        serde_json::to_writer(&mut *guard, &record).map_err(|err| err.to_string())?;
        guard.write_all(b"\n").map_err(|err| err.to_string())?;
        guard.flush().map_err(|err| err.to_string())?;
        drop(guard);
        Ok(())
    }
}
