// crates/locale-merge-config/src/lib.rs
// ============================================================================
// Module: Locale Merge Config Library
// Description: Configuration model and validation for locale-merge.toml.
// Purpose: Single source of truth for where locale trees live.
// Dependencies: locale-merge-core, serde, toml
// ============================================================================

//! ## Overview
//! `locale-merge-config` loads the optional `locale-merge.toml` file that
//! relocates the base, override, and output trees and tunes output indent and
//! input size limits. Loading is strict: unknown fields, escaping paths, and
//! out-of-range values are rejected before any catalog is touched.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
