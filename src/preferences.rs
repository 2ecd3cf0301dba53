//! Saved user preferences.
//!
//! The only persisted value is the birth year used for life progress. It is
//! stored as a small JSON document in the user's config directory:
//!
//! ```text
//! ~/.config/timeprogress/preferences.json
//! { "birth_year": 1990 }
//! ```
//!
//! Validation of a birth year entered by the user happens here, at the
//! boundary; the progress calculator consumes whatever it is given.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Earliest birth year accepted from user input.
pub const MIN_BIRTH_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("birth year must be between {min} and {max}, got {year}")]
    InvalidBirthYear { year: i32, min: i32, max: i32 },
    #[error("not a year: {0:?}")]
    NotANumber(String),
}

/// `<config dir>/timeprogress/preferences.json`, if the platform has a config dir.
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("timeprogress").join("preferences.json"))
}

/// Accept `year` only within `MIN_BIRTH_YEAR..=current_year`.
pub fn validate_birth_year(year: i32, current_year: i32) -> Result<i32, PreferencesError> {
    if (MIN_BIRTH_YEAR..=current_year).contains(&year) {
        Ok(year)
    } else {
        Err(PreferencesError::InvalidBirthYear {
            year,
            min: MIN_BIRTH_YEAR,
            max: current_year,
        })
    }
}

/// Parse and validate a birth year typed by the user.
pub fn parse_birth_year(text: &str, current_year: i32) -> Result<i32, PreferencesError> {
    let trimmed = text.trim();
    let year = trimmed
        .parse::<i32>()
        .map_err(|_| PreferencesError::NotANumber(trimmed.to_string()))?;
    validate_birth_year(year, current_year)
}

/// Loads preferences from a JSON file.
///
/// Returns defaults if the file doesn't exist or is invalid.
pub async fn load_preferences(path: &Path) -> Preferences {
    match load_preferences_inner(path).await {
        Ok(prefs) => {
            tracing::debug!(
                path = %path.display(),
                birth_year = ?prefs.birth_year,
                "Loaded preferences"
            );
            prefs
        }
        Err(PreferencesError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            // First run - file doesn't exist yet
            tracing::info!(path = %path.display(), "No saved preferences");
            Preferences::default()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load preferences, using defaults"
            );
            Preferences::default()
        }
    }
}

async fn load_preferences_inner(path: &Path) -> Result<Preferences, PreferencesError> {
    let contents = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Saves preferences to a JSON file, creating parent directories as needed.
pub async fn save_preferences(prefs: &Preferences, path: &Path) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(prefs)?;
    let mut file = fs::File::create(path).await?;
    file.write_all(json.as_bytes()).await?;
    file.flush().await?;
    tracing::debug!(path = %path.display(), "Saved preferences");
    Ok(())
}
