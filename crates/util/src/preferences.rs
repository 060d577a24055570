//! User preference loading for the datepick CLI/TUI.
//!
//! This module reads a tiny JSON document with defaults that apply to every
//! control the user opens: locale, presentation strategy, clock style,
//! transition duration and per-mode output patterns. The file lives in the
//! standard configuration directory (`~/.config/datepick/preferences.json` on
//! most platforms) unless `DATEPICK_CONFIG_PATH` points elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use datepick_types::{PickerConfig, PresentationStrategy, SelectionMode};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "DATEPICK_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Output patterns keyed by selection mode.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPreferences {
    pub date: Option<String>,
    pub time: Option<String>,
    pub datetime: Option<String>,
}

impl FormatPreferences {
    /// Pattern configured for `mode`, if any.
    pub fn for_mode(&self, mode: SelectionMode) -> Option<&str> {
        match mode {
            SelectionMode::Date => self.date.as_deref(),
            SelectionMode::Time => self.time.as_deref(),
            SelectionMode::DateTime => self.datetime.as_deref(),
        }
    }
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesPayload {
    /// Locale identifier handed to the formatter.
    pub locale: Option<String>,
    /// Inline or modal presentation.
    pub presentation: Option<PresentationStrategy>,
    /// Whether the widget shows a 24-hour clock.
    pub is_24_hour: Option<bool>,
    /// Duration of the modal show/hide transition.
    pub transition_duration_ms: Option<u64>,
    /// Per-mode output patterns.
    pub formats: FormatPreferences,
}

/// Preferences loaded from disk (or an empty in-memory fallback).
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: PreferencesPayload,
}

impl UserPreferences {
    /// Load preferences from the default location.
    pub fn new() -> Result<Self, PreferencesError> {
        Self::from_path(default_preferences_path())
    }

    /// Load preferences from an explicit path. A missing file yields defaults.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self { path, payload })
    }

    /// Build an empty store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded values.
    pub fn payload(&self) -> &PreferencesPayload {
        &self.payload
    }

    /// Copies every present preference onto `config`.
    ///
    /// An explicit `format` already on the config is kept; callers apply
    /// command-line overrides after this.
    pub fn apply_to(&self, config: &mut PickerConfig) {
        let payload = &self.payload;
        if let Some(locale) = &payload.locale {
            config.locale = locale.clone();
        }
        if let Some(presentation) = payload.presentation {
            config.presentation = presentation;
        }
        if let Some(is_24_hour) = payload.is_24_hour {
            config.is_24_hour = is_24_hour;
        }
        if let Some(duration) = payload.transition_duration_ms {
            config.transition_duration_ms = duration;
        }
        if config.format.is_none()
            && let Some(pattern) = payload.formats.for_mode(config.mode)
        {
            config.format = Some(pattern.to_string());
        }
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("datepick")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => {
                debug!(path = %path.display(), "Loaded preferences");
                Ok(payload)
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let preferences = UserPreferences::from_path(dir.path().join("absent.json")).unwrap();
        assert_eq!(preferences.payload(), &PreferencesPayload::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let preferences = UserPreferences::from_path(&path).unwrap();
        assert_eq!(preferences.payload(), &PreferencesPayload::default());
    }

    #[test]
    fn applies_values_without_clobbering_explicit_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "locale": "de-DE",
                "presentation": "inline",
                "is_24_hour": false,
                "transition_duration_ms": 120,
                "formats": { "date": "DD.MM.YYYY", "time": "h:mm A" }
            }"#,
        )
        .unwrap();
        let preferences = UserPreferences::from_path(&path).unwrap();

        let mut date_config = PickerConfig::new(SelectionMode::Date);
        preferences.apply_to(&mut date_config);
        assert_eq!(date_config.locale, "de-DE");
        assert_eq!(date_config.presentation, PresentationStrategy::Inline);
        assert!(!date_config.is_24_hour);
        assert_eq!(date_config.transition_duration_ms, 120);
        assert_eq!(date_config.pattern(), "DD.MM.YYYY");

        let mut time_config = PickerConfig::new(SelectionMode::Time).with_format("HH:mm:ss");
        preferences.apply_to(&mut time_config);
        assert_eq!(time_config.pattern(), "HH:mm:ss");

        let mut datetime_config = PickerConfig::new(SelectionMode::DateTime);
        preferences.apply_to(&mut datetime_config);
        assert_eq!(datetime_config.pattern(), "YYYY-MM-DD HH:mm");
    }

    #[test]
    fn env_override_selects_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "locale": "fr-FR" }"#).unwrap();

        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.as_os_str()), || {
            let preferences = UserPreferences::new().unwrap();
            assert_eq!(preferences.path(), path.as_path());
            assert_eq!(preferences.payload().locale.as_deref(), Some("fr-FR"));
        });
    }
}
