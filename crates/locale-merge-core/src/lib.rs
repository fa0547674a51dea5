// crates/locale-merge-core/src/lib.rs
// ============================================================================
// Module: Locale Merge Core Library
// Description: Catalog model, override merge, locale layout, and merge runner.
// Purpose: Merge base and override message catalogs per language for builds.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `locale-merge-core` merges per-language message catalogs: a base tree of
//! `messages.json` files and one or more override trees whose entries win when
//! their `message` text differs. The merged catalogs are written into a build
//! output tree.
//!
//! Invariants:
//! - Key order follows the base catalog, then override-only keys in override
//!   order. Keys are never sorted.
//! - Any read, parse, or write failure aborts the run.
//! - Output uses the configured indent and writes non-ASCII text literally.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod io;
pub mod layout;
pub mod merge;
pub mod observer;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::LanguageCode;
pub use catalog::LanguageCodeError;
pub use catalog::MESSAGE_FIELD;
pub use error::ErrorClass;
pub use error::MergeError;
pub use io::DEFAULT_INDENT;
pub use io::DEFAULT_MAX_CATALOG_BYTES;
pub use io::read_catalog;
pub use io::render_catalog;
pub use io::write_catalog;
pub use layout::LocaleLayout;
pub use merge::CatalogSide;
pub use merge::EntryShapeError;
pub use merge::LayerMergeError;
pub use merge::MergeSummary;
pub use merge::merge_catalog;
pub use merge::merge_layers;
pub use observer::JsonLinesObserver;
pub use observer::MergeObserver;
pub use observer::NoopObserver;
pub use runner::LanguageOutcome;
pub use runner::MergeOptions;
pub use runner::MergeRunner;
pub use runner::MergedLanguage;
pub use runner::OutputStatus;
pub use runner::RunMode;
pub use runner::RunReport;
