// crates/locale-merge-config/src/config.rs
// ============================================================================
// Module: Locale Merge Configuration
// Description: Configuration loading and validation for the merge step.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: locale-merge-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is read from a TOML file with strict size and path limits.
//! When no file is named and none exists in the working directory, built-in
//! defaults reproduce the conventional layout: `src/_locales` merged with
//! `src/_locales_findx` into `<build>/_locales`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use locale_merge_core::DEFAULT_INDENT;
use locale_merge_core::DEFAULT_MAX_CATALOG_BYTES;
use locale_merge_core::LocaleLayout;
use locale_merge_core::MergeOptions;
use locale_merge_core::RunMode;
use locale_merge_core::layout::DEFAULT_BASE_TREE;
use locale_merge_core::layout::DEFAULT_CATALOG_FILE;
use locale_merge_core::layout::DEFAULT_OUTPUT_TREE;
use locale_merge_core::layout::DEFAULT_OVERRIDE_TREE;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "locale-merge.toml";
/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "LOCALE_MERGE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted output indent.
pub const MIN_INDENT: usize = 1;
/// Largest accepted output indent.
pub const MAX_INDENT: usize = 16;
/// Smallest accepted catalog size limit.
pub const MIN_CATALOG_BYTES_LIMIT: usize = 1024;
/// Largest accepted catalog size limit.
pub const MAX_CATALOG_BYTES_LIMIT: usize = 256 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Locale merge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleMergeConfig {
    /// Root of the locale source trees. Relative roots resolve against the
    /// working directory.
    #[serde(default)]
    pub source_root: Option<PathBuf>,
    /// Tree locations.
    #[serde(default)]
    pub trees: TreesConfig,
    /// Output formatting.
    #[serde(default)]
    pub output: OutputConfig,
    /// Input limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl LocaleMergeConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// An explicit `path` wins, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory when present. With
    /// none of those the built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path, env::var_os(CONFIG_ENV_VAR))? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.source_root {
            validate_path_string("source_root", &root.to_string_lossy())?;
        }
        self.trees.validate()?;
        self.output.validate()?;
        self.limits.validate()
    }

    /// Returns the source root: `explicit` when given, else the configured
    /// root, else the working directory.
    #[must_use]
    pub fn effective_source_root(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.source_root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Builds the locale layout for a source root and build directory.
    #[must_use]
    pub fn layout(&self, source_root: &Path, build_dir: &Path) -> LocaleLayout {
        LocaleLayout::new(
            source_root.join(&self.trees.base),
            self.trees.overrides.iter().map(|tree| source_root.join(tree)).collect(),
            build_dir.join(&self.trees.output),
            self.trees.catalog_file.clone(),
        )
    }

    /// Builds runner options for the given mode.
    #[must_use]
    pub const fn options(&self, mode: RunMode) -> MergeOptions {
        MergeOptions {
            mode,
            indent: self.output.indent,
            max_catalog_bytes: self.limits.max_catalog_bytes,
        }
    }
}

/// Locale tree locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreesConfig {
    /// Base tree, relative to the source root.
    pub base: String,
    /// Override trees, relative to the source root. Later trees win.
    pub overrides: Vec<String>,
    /// Output tree, relative to the build directory.
    pub output: String,
    /// Catalog file name inside each language directory.
    pub catalog_file: String,
}

impl Default for TreesConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_TREE.to_string(),
            overrides: vec![DEFAULT_OVERRIDE_TREE.to_string()],
            output: DEFAULT_OUTPUT_TREE.to_string(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
        }
    }
}

impl TreesConfig {
    /// Validates tree paths and the catalog file name.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_tree_path("trees.base", &self.base)?;
        validate_tree_path("trees.output", &self.output)?;
        if self.overrides.is_empty() {
            return Err(ConfigError::Invalid("trees.overrides must be non-empty".to_string()));
        }
        let base = normalize_tree(&self.base);
        let mut seen = BTreeSet::new();
        for tree in &self.overrides {
            validate_tree_path("trees.overrides", tree)?;
            let normalized = normalize_tree(tree);
            if normalized == base {
                return Err(ConfigError::Invalid(format!(
                    "trees.overrides entry {tree} must differ from trees.base"
                )));
            }
            if !seen.insert(normalized) {
                return Err(ConfigError::Invalid(format!(
                    "trees.overrides entry {tree} is duplicated"
                )));
            }
        }
        validate_file_name("trees.catalog_file", &self.catalog_file)
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

impl OutputConfig {
    /// Validates the indent range.
    fn validate(self) -> Result<(), ConfigError> {
        if !(MIN_INDENT ..= MAX_INDENT).contains(&self.indent) {
            return Err(ConfigError::Invalid(format!(
                "output.indent must be between {MIN_INDENT} and {MAX_INDENT}"
            )));
        }
        Ok(())
    }
}

/// Input size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum size of any catalog file in bytes.
    pub max_catalog_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_catalog_bytes: DEFAULT_MAX_CATALOG_BYTES,
        }
    }
}

impl LimitsConfig {
    /// Validates the size limit range.
    fn validate(self) -> Result<(), ConfigError> {
        if !(MIN_CATALOG_BYTES_LIMIT ..= MAX_CATALOG_BYTES_LIMIT).contains(&self.max_catalog_bytes)
        {
            return Err(ConfigError::Invalid(format!(
                "limits.max_catalog_bytes must be between {MIN_CATALOG_BYTES_LIMIT} and \
                 {MAX_CATALOG_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the CLI, the environment, or the default
/// file name. Returns `None` when no file applies.
fn resolve_path(
    path: Option<&Path>,
    env_path: Option<OsString>,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        if env_path.is_empty() {
            return Err(ConfigError::Invalid(format!("{CONFIG_ENV_VAR} must be non-empty")));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    reject_surrounding_whitespace(field, value)?;
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a tree path: relative and never escaping its root.
fn validate_tree_path(field: &str, value: &str) -> Result<(), ConfigError> {
    validate_path_string(field, value)?;
    for component in Path::new(value).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(ConfigError::Invalid(format!("{field} must be relative")));
            }
            Component::ParentDir => {
                return Err(ConfigError::Invalid(format!("{field} must not contain '..'")));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Validates a bare file name.
fn validate_file_name(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    reject_surrounding_whitespace(field, value)?;
    if trimmed.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(ConfigError::Invalid(format!("{field} must be a plain file name")));
    }
    Ok(())
}

/// Rejects values that would be joined onto a path with stray whitespace.
fn reject_surrounding_whitespace(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim() == value {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must not have leading or trailing whitespace")))
    }
}

/// Normalizes a validated tree path for comparison.
fn normalize_tree(value: &str) -> PathBuf {
    Path::new(value)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
