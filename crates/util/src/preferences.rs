//! Persisted user choices: the preferred theme and an optional locale file.
//!
//! Stored as JSON in `config_root()/preferences.json` unless
//! `RAIL_PREFERENCES_PATH` points elsewhere. Writes go to a sibling temp file
//! first and are renamed into place.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Overrides the location of the preferences file.
pub const PREFERENCES_PATH_ENV: &str = "RAIL_PREFERENCES_PATH";

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("cannot access preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot encode preferences: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk shape of the preferences file. Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_path: Option<PathBuf>,
}

/// Preferences shared across the process.
///
/// A store without a location keeps changes in memory only; the CLI falls
/// back to one when the configuration directory is unusable.
#[derive(Debug, Default)]
pub struct UserPreferences {
    location: Option<PathBuf>,
    values: Mutex<PreferencesPayload>,
}

impl UserPreferences {
    /// Opens the store at `RAIL_PREFERENCES_PATH` or the default location.
    pub fn new() -> Result<Self, PreferencesError> {
        Self::at(default_preferences_path())
    }

    pub fn at(path: PathBuf) -> Result<Self, PreferencesError> {
        let values = read_payload(&path)?;
        Ok(Self {
            location: Some(path),
            values: Mutex::new(values),
        })
    }

    pub fn ephemeral() -> Self {
        Self::default()
    }

    /// Backing file, `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    /// Locale file with `~` expanded.
    pub fn locale_path(&self) -> Option<PathBuf> {
        let stored = self.lock().locale_path.clone()?;
        Some(expand_tilde(&stored.to_string_lossy()))
    }

    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        self.modify(|values| values.preferred_theme = theme_id)
    }

    pub fn set_locale_path(&self, locale_path: Option<PathBuf>) -> Result<(), PreferencesError> {
        self.modify(|values| values.locale_path = locale_path)
    }

    fn lock(&self) -> MutexGuard<'_, PreferencesPayload> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn modify(&self, change: impl FnOnce(&mut PreferencesPayload)) -> Result<(), PreferencesError> {
        let mut values = self.lock();
        change(&mut values);
        match &self.location {
            Some(path) => write_payload(path, &values),
            None => Ok(()),
        }
    }
}

/// Directory holding Rail's configuration and log files.
pub fn config_root() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("rail")
}

fn default_preferences_path() -> PathBuf {
    env::var(PREFERENCES_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| expand_tilde(&value))
        .unwrap_or_else(|| config_root().join(PREFERENCES_FILE_NAME))
}

fn read_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no preferences file yet");
            return Ok(PreferencesPayload::default());
        }
        Err(error) => return Err(error.into()),
    };
    Ok(serde_json::from_str(&text).unwrap_or_else(|error| {
        warn!(path = %path.display(), %error, "ignoring unreadable preferences file");
        PreferencesPayload::default()
    }))
}

fn write_payload(path: &Path, values: &PreferencesPayload) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, serde_json::to_vec_pretty(values)?)?;
    fs::rename(&staging, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let prefs = UserPreferences::at(dir.path().join("preferences.json")).expect("open prefs");
        assert_eq!(prefs.preferred_theme(), None);
        assert_eq!(prefs.locale_path(), None);
    }

    #[test]
    fn theme_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = UserPreferences::at(path.clone()).expect("open prefs");
        prefs.set_preferred_theme(Some("nord".into())).expect("save theme");

        let reopened = UserPreferences::at(path).expect("reopen prefs");
        assert_eq!(reopened.preferred_theme().as_deref(), Some("nord"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").expect("write garbage");
        let prefs = UserPreferences::at(path).expect("open prefs");
        assert_eq!(prefs.preferred_theme(), None);
    }

    #[test]
    fn ephemeral_store_never_touches_disk() {
        let prefs = UserPreferences::ephemeral();
        prefs.set_preferred_theme(Some("dracula".into())).expect("set theme");
        assert_eq!(prefs.preferred_theme().as_deref(), Some("dracula"));
        assert_eq!(prefs.path(), None);
    }

    #[test]
    fn cleared_values_are_omitted_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("preferences.json");
        let prefs = UserPreferences::at(path.clone()).expect("open prefs");
        prefs.set_locale_path(Some(PathBuf::from("/tmp/fr.json"))).expect("save locale");
        prefs.set_locale_path(None).expect("clear locale");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(!text.contains("locale_path"), "{text}");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn env_override_selects_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let custom = dir.path().join("custom.json");
        let custom_str = custom.to_string_lossy().to_string();
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(custom_str.as_str()), || {
            assert_eq!(default_preferences_path(), custom);
        });
    }
}
