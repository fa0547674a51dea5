// crates/locale-merge-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings so diagnostics stay consistent.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The locale-merge CLI stores user-facing strings in a small translation
//! catalog. All runtime output should be routed through the [`t!`](crate::t)
//! macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "locale-merge {version}"),
    ("main.build_dir_missing", "Build dir missing."),
    ("config.load_failed", "Failed to load configuration: {error}"),
    ("merge.discovery_failed", "Failed to list language directories in {path}: {error}"),
    ("merge.invalid_language", "Invalid language directory {path}: {error}"),
    ("merge.non_utf8_language", "Language directory name is not valid UTF-8: {path}"),
    ("merge.read_failed", "Failed to read catalog {path}: {error}"),
    (
        "merge.read_too_large",
        "Refusing to read catalog {path} because it is {size} bytes (limit {limit}).",
    ),
    ("merge.parse_failed", "Failed to parse catalog JSON at {path}: {error}"),
    ("merge.not_an_object", "Catalog {path} must contain a JSON object."),
    ("merge.entry_shape", "Cannot merge the {language} catalog from {path}: {error}"),
    ("merge.render_failed", "Failed to render the merged {language} catalog: {error}"),
    ("merge.write_failed", "Failed to write merged catalog {path}: {error}"),
    ("merge.drift", "Merged catalogs are out of date for: {languages}"),
    ("merge.observer_failed", "Failed to record merge progress: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "locale-merge {version}"),
    ("main.build_dir_missing", "Falta el directori de compilació."),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    (
        "merge.discovery_failed",
        "No s'han pogut llistar els directoris d'idioma a {path}: {error}",
    ),
    ("merge.invalid_language", "Directori d'idioma no vàlid {path}: {error}"),
    ("merge.non_utf8_language", "El nom del directori d'idioma no és UTF-8 vàlid: {path}"),
    ("merge.read_failed", "No s'ha pogut llegir el catàleg {path}: {error}"),
    (
        "merge.read_too_large",
        "Es refusa llegir el catàleg {path} perquè té {size} bytes (límit {limit}).",
    ),
    ("merge.parse_failed", "No s'ha pogut analitzar el JSON del catàleg a {path}: {error}"),
    ("merge.not_an_object", "El catàleg {path} ha de contenir un objecte JSON."),
    ("merge.entry_shape", "No es pot fusionar el catàleg {language} de {path}: {error}"),
    ("merge.render_failed", "No s'ha pogut generar el catàleg fusionat {language}: {error}"),
    ("merge.write_failed", "No s'ha pogut escriure el catàleg fusionat {path}: {error}"),
    ("merge.drift", "Els catàlegs fusionats no estan actualitzats per a: {languages}"),
    ("merge.observer_failed", "No s'ha pogut registrar el progrés de la fusió: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

/// Returns the raw catalog entries for the requested locale, duplicates included.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(
    locale: Locale,
) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
