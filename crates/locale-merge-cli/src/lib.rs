// crates/locale-merge-cli/src/lib.rs
// ============================================================================
// Module: Locale Merge CLI Library
// Description: Shared helpers for the locale-merge command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses the CLI's internationalized message catalog.
//! The binary entry point (`src/main.rs`) imports these helpers so every
//! diagnostic goes through the same catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
