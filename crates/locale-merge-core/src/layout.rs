// crates/locale-merge-core/src/layout.rs
// ============================================================================
// Module: Locale Tree Layout
// Description: Path resolution and language discovery for locale trees.
// Purpose: Map language codes onto base, override, and output catalog files.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`LocaleLayout`] names one base tree, an ordered list of override trees,
//! and an output tree. Every tree holds one directory per language code, each
//! containing a catalog file (`messages.json` by default).
//!
//! The override trees are authoritative for which languages are processed:
//! [`LocaleLayout::discover_languages`] returns the sorted union of their
//! language directories. Hidden directories (leading `.`) and plain files are
//! ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::catalog::LanguageCode;
use crate::error::MergeError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default catalog file name inside each language directory.
pub const DEFAULT_CATALOG_FILE: &str = "messages.json";
/// Default base tree, relative to the source root.
pub const DEFAULT_BASE_TREE: &str = "src/_locales";
/// Default override tree, relative to the source root.
pub const DEFAULT_OVERRIDE_TREE: &str = "src/_locales_findx";
/// Default output tree, relative to the build directory.
pub const DEFAULT_OUTPUT_TREE: &str = "_locales";

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Resolved locale tree locations for one run.
///
/// # Invariants
/// - `overlay_trees` is ordered; later trees win on conflict.
/// - `catalog_file` is a single file name, not a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleLayout {
    /// Base tree root.
    base_tree: PathBuf,
    /// Override tree roots in application order.
    overlay_trees: Vec<PathBuf>,
    /// Output tree root.
    output_tree: PathBuf,
    /// Catalog file name inside each language directory.
    catalog_file: String,
}

impl LocaleLayout {
    /// Creates a layout from explicit tree roots.
    #[must_use]
    pub fn new(
        base_tree: impl Into<PathBuf>,
        overlay_trees: Vec<PathBuf>,
        output_tree: impl Into<PathBuf>,
        catalog_file: impl Into<String>,
    ) -> Self {
        Self {
            base_tree: base_tree.into(),
            overlay_trees,
            output_tree: output_tree.into(),
            catalog_file: catalog_file.into(),
        }
    }

    /// Creates the conventional two-tier layout rooted at `source_root` and
    /// writing under `build_dir`.
    #[must_use]
    pub fn standard(source_root: &Path, build_dir: &Path) -> Self {
        Self::new(
            source_root.join(DEFAULT_BASE_TREE),
            vec![source_root.join(DEFAULT_OVERRIDE_TREE)],
            build_dir.join(DEFAULT_OUTPUT_TREE),
            DEFAULT_CATALOG_FILE,
        )
    }

    /// Returns the base tree root.
    #[must_use]
    pub fn base_tree(&self) -> &Path {
        &self.base_tree
    }

    /// Returns the override tree roots in application order.
    #[must_use]
    pub fn overlay_trees(&self) -> &[PathBuf] {
        &self.overlay_trees
    }

    /// Returns the output tree root.
    #[must_use]
    pub fn output_tree(&self) -> &Path {
        &self.output_tree
    }

    /// Returns the base catalog path for `language`.
    #[must_use]
    pub fn base_catalog(&self, language: &LanguageCode) -> PathBuf {
        self.catalog_in(&self.base_tree, language)
    }

    /// Returns the output catalog path for `language`.
    #[must_use]
    pub fn output_catalog(&self, language: &LanguageCode) -> PathBuf {
        self.catalog_in(&self.output_tree, language)
    }

    /// Returns the override catalog paths that apply to `language`, in order.
    ///
    /// An override tree contributes only when it has a directory for the
    /// language; a directory without a catalog file still yields a path so the
    /// read fails loudly.
    #[must_use]
    pub fn overlay_catalogs(&self, language: &LanguageCode) -> Vec<PathBuf> {
        self.overlay_trees
            .iter()
            .filter(|tree| tree.join(language.as_str()).is_dir())
            .map(|tree| self.catalog_in(tree, language))
            .collect()
    }

    /// Lists the language codes to process.
    ///
    /// Returns the sorted union of language directories across all override
    /// trees.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Discovery`] when a tree cannot be listed, and
    /// [`MergeError::InvalidLanguage`] or [`MergeError::NonUtf8Language`] when a
    /// directory name cannot be used as a language code.
    pub fn discover_languages(&self) -> Result<Vec<LanguageCode>, MergeError> {
        let mut languages = BTreeSet::new();
        for tree in &self.overlay_trees {
            languages.extend(list_language_dirs(tree)?);
        }
        Ok(languages.into_iter().collect())
    }

    /// Joins a tree root, language directory, and catalog file name.
    fn catalog_in(&self, tree: &Path, language: &LanguageCode) -> PathBuf {
        tree.join(language.as_str()).join(&self.catalog_file)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Lists the language directories directly under `tree`.
fn list_language_dirs(tree: &Path) -> Result<Vec<LanguageCode>, MergeError> {
    let discovery_error = |error| MergeError::Discovery {
        path: tree.to_path_buf(),
        error,
    };
    let mut languages = Vec::new();
    for entry in fs::read_dir(tree).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            return Err(MergeError::NonUtf8Language {
                path,
            });
        };
        if name.starts_with('.') {
            continue;
        }
        let language = LanguageCode::parse(&name).map_err(|error| MergeError::InvalidLanguage {
            path: path.clone(),
            error,
        })?;
        languages.push(language);
    }
    Ok(languages)
}
