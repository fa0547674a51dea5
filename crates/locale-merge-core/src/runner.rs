// crates/locale-merge-core/src/runner.rs
// ============================================================================
// Module: Locale Merge Runner
// Description: Sequential per-language merge step over a locale layout.
// Purpose: Discover languages, merge catalogs, and write or verify outputs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`MergeRunner::run`] is the whole merge step. For each language discovered
//! in the override trees it reads the base catalog and every applicable
//! override catalog, folds the overrides over the base, renders the result, and
//! either writes it ([`RunMode::Write`]) or compares it with the existing
//! output ([`RunMode::Check`]).
//!
//! ## Invariants
//! - Languages are processed one at a time in sorted order.
//! - Both inputs are fully read before the output is touched.
//! - The first failure aborts the run; outputs already written stay on disk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::LanguageCode;
use crate::error::MergeError;
use crate::io::DEFAULT_INDENT;
use crate::io::DEFAULT_MAX_CATALOG_BYTES;
use crate::io::output_matches;
use crate::io::read_catalog;
use crate::io::render_catalog;
use crate::io::write_catalog;
use crate::layout::LocaleLayout;
use crate::merge::MergeSummary;
use crate::merge::merge_layers;
use crate::observer::MergeObserver;

// ============================================================================
// SECTION: Options
// ============================================================================

/// What the runner does with each merged catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Write merged catalogs to the output tree.
    #[default]
    Write,
    /// Compare merged catalogs with the output tree without writing.
    Check,
}

/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Write or check.
    pub mode: RunMode,
    /// Spaces per indentation level in rendered output.
    pub indent: usize,
    /// Maximum size of any input catalog in bytes.
    pub max_catalog_bytes: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Write,
            indent: DEFAULT_INDENT,
            max_catalog_bytes: DEFAULT_MAX_CATALOG_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Output state for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStatus {
    /// The merged catalog was written.
    Written,
    /// Check mode: the output already matches.
    Current,
    /// Check mode: the output differs or is missing.
    Stale,
}

impl OutputStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Current => "current",
            Self::Stale => "stale",
        }
    }
}

/// Result of processing one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOutcome {
    /// Language code.
    pub language: LanguageCode,
    /// Number of keys in the base catalog before merging.
    pub base_keys: usize,
    /// Number of override catalogs applied.
    pub overlay_count: usize,
    /// Number of keys in the merged catalog.
    pub merged_keys: usize,
    /// How override keys were applied.
    pub summary: MergeSummary,
    /// Output catalog path.
    pub output: PathBuf,
    /// Output state.
    pub status: OutputStatus,
}

/// In-memory merge result for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLanguage {
    /// Merged catalog.
    pub catalog: Catalog,
    /// Number of keys in the base catalog before merging.
    pub base_keys: usize,
    /// Number of override catalogs applied.
    pub overlay_count: usize,
    /// How override keys were applied.
    pub summary: MergeSummary,
}

/// Result of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Per-language outcomes in processing order.
    pub languages: Vec<LanguageOutcome>,
}

impl RunReport {
    /// Returns the combined merge summary across languages.
    #[must_use]
    pub fn summary(&self) -> MergeSummary {
        self.languages
            .iter()
            .fold(MergeSummary::default(), |total, outcome| total.combine(outcome.summary))
    }

    /// Returns the languages whose outputs are stale.
    #[must_use]
    pub fn stale_languages(&self) -> Vec<String> {
        self.languages
            .iter()
            .filter(|outcome| outcome.status == OutputStatus::Stale)
            .map(|outcome| outcome.language.to_string())
            .collect()
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs the merge step over a layout.
#[derive(Debug, Clone)]
pub struct MergeRunner {
    /// Locale tree locations.
    layout: LocaleLayout,
    /// Runner settings.
    options: MergeOptions,
}

impl MergeRunner {
    /// Creates a runner.
    #[must_use]
    pub const fn new(layout: LocaleLayout, options: MergeOptions) -> Self {
        Self {
            layout,
            options,
        }
    }

    /// Returns the layout this runner uses.
    #[must_use]
    pub const fn layout(&self) -> &LocaleLayout {
        &self.layout
    }

    /// Runs the merge step for every discovered language.
    ///
    /// # Errors
    ///
    /// Returns the first [`MergeError`] encountered. In check mode, returns
    /// [`MergeError::Drift`] after all languages are processed if any output is
    /// stale.
    pub fn run(&self, observer: &dyn MergeObserver) -> Result<RunReport, MergeError> {
        let mut report = RunReport::default();
        for language in self.layout.discover_languages()? {
            let outcome = self.process_language(language)?;
            observer.record_language(&outcome).map_err(MergeError::Observer)?;
            report.languages.push(outcome);
        }
        let stale = report.stale_languages();
        if !stale.is_empty() {
            return Err(MergeError::Drift {
                languages: stale,
            });
        }
        Ok(report)
    }

    /// Reads and merges the catalogs for one language without touching outputs.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError`] when an input cannot be read or merged.
    pub fn merge_language(&self, language: &LanguageCode) -> Result<MergedLanguage, MergeError> {
        let limit = self.options.max_catalog_bytes;
        let mut merged = read_catalog(&self.layout.base_catalog(language), limit)?;
        let base_keys = merged.len();
        let overlay_paths = self.layout.overlay_catalogs(language);
        let overlays = overlay_paths
            .iter()
            .map(|path| read_catalog(path, limit))
            .collect::<Result<Vec<_>, _>>()?;
        let summary = merge_layers(&mut merged, &overlays).map_err(|err| {
            let path = overlay_paths.get(err.layer).cloned().unwrap_or_default();
            MergeError::EntryShape {
                language: language.to_string(),
                path,
                error: err.error,
            }
        })?;
        Ok(MergedLanguage {
            catalog: merged,
            base_keys,
            overlay_count: overlays.len(),
            summary,
        })
    }

    /// Merges one language and writes or checks its output.
    fn process_language(&self, language: LanguageCode) -> Result<LanguageOutcome, MergeError> {
        let merged = self.merge_language(&language)?;
        let bytes = render_catalog(&merged.catalog, self.options.indent).map_err(|error| {
            MergeError::Render {
                language: language.to_string(),
                error,
            }
        })?;
        let output = self.layout.output_catalog(&language);
        let status = match self.options.mode {
            RunMode::Write => {
                write_catalog(&output, &bytes)?;
                OutputStatus::Written
            }
            RunMode::Check => {
                if output_matches(&output, &bytes)? {
                    OutputStatus::Current
                } else {
                    OutputStatus::Stale
                }
            }
        };
        Ok(LanguageOutcome {
            language,
            base_keys: merged.base_keys,
            overlay_count: merged.overlay_count,
            merged_keys: merged.catalog.len(),
            summary: merged.summary,
            output,
            status,
        })
    }
}
