//! Localized string lookup.
//!
//! The rail never hardcodes user-facing copy; it asks a [`Translator`] for a
//! key. The built-in English catalog is embedded at compile time. A locale
//! file (a flat JSON object of key to string) may be layered on top; keys it
//! does not define fall through to the built-in catalog, and unknown keys
//! resolve to the key itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;

const BUILTIN_EN: &str = include_str!("../locales/en.json");

static BUILTIN_CATALOG: Lazy<HashMap<String, String>> =
    Lazy::new(|| serde_json::from_str(BUILTIN_EN).unwrap_or_default());

/// Error surfaced when a locale file cannot be loaded.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("locale I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("locale parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-based string catalog with a built-in English fallback.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    overrides: HashMap<String, String>,
}

impl Translator {
    /// Translator backed only by the built-in English catalog.
    pub fn english() -> Self {
        Self::default()
    }

    /// Translator with the given overrides layered on top of English.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Loads a locale file and layers it over the built-in catalog.
    pub fn from_file(path: &Path) -> Result<Self, LocaleError> {
        let data = fs::read_to_string(path)?;
        let overrides: HashMap<String, String> = serde_json::from_str(&data)?;
        debug!(path = %path.display(), keys = overrides.len(), "loaded locale overrides");
        Ok(Self::with_overrides(overrides))
    }

    /// Looks up `key`, returning the key itself when no catalog defines it.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.overrides
            .get(key)
            .or_else(|| BUILTIN_CATALOG.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_resolves_known_keys() {
        let strings = Translator::english();
        assert_eq!(strings.t("signIn"), "Sign in");
        assert_eq!(strings.t("appBar.kanban.migrateOldProjects"), "Migrate old projects");
    }

    #[test]
    fn unknown_keys_fall_back_to_key() {
        let strings = Translator::english();
        assert_eq!(strings.t("appBar.nope"), "appBar.nope");
    }

    #[test]
    fn overrides_win_over_builtin() {
        let mut overrides = HashMap::new();
        overrides.insert("signIn".to_string(), "Anmelden".to_string());
        let strings = Translator::with_overrides(overrides);
        assert_eq!(strings.t("signIn"), "Anmelden");
        assert_eq!(strings.t("appBar.workspaces"), "Workspaces");
    }

    #[test]
    fn loads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "appBar.workspaces": "Espaces" }}"#).expect("write locale");
        let strings = Translator::from_file(file.path()).expect("load locale");
        assert_eq!(strings.t("appBar.workspaces"), "Espaces");
    }

    #[test]
    fn malformed_locale_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write locale");
        assert!(matches!(Translator::from_file(file.path()), Err(LocaleError::Parse(_))));
    }
}
