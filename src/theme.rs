//! Light/dark theming and the persisted theme preference.
//!
//! The preference lives in a small JSON file in the user's configuration directory
//! (`~/.config/folio/preferences.json` on most platforms). Without a saved choice the terminal's
//! background is used as the system preference.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "FOLIO_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Colour scheme of the page.
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    #[must_use]
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    /// Icon on the toggle button: the sun offers a way out of dark mode, the moon into it.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    #[must_use]
    /// Value of the document's `data-theme` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    /// Colours for drawing the page in this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::Rgb(250, 250, 247),
                text: Color::Rgb(40, 40, 46),
                muted: Color::Rgb(140, 140, 150),
                accent: Color::Rgb(37, 99, 235),
                heading: Color::Rgb(17, 24, 39),
                error: Color::Rgb(185, 28, 28),
                success: Color::Rgb(21, 128, 61),
            },
            Self::Dark => Palette {
                background: Color::Rgb(17, 19, 24),
                text: Color::Rgb(226, 228, 233),
                muted: Color::Rgb(110, 114, 125),
                accent: Color::Rgb(96, 165, 250),
                heading: Color::Rgb(243, 244, 246),
                error: Color::Rgb(248, 113, 113),
                success: Color::Rgb(74, 222, 128),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Colours used by the UI for one theme.
pub struct Palette {
    /// Page background.
    pub background: Color,
    /// Body text.
    pub text: Color,
    /// Secondary text and not-yet-revealed content.
    pub muted: Color,
    /// Active link and controls.
    pub accent: Color,
    /// Section headings.
    pub heading: Color,
    /// Form errors.
    pub error: Color,
    /// Form success notice.
    pub success: Color,
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Theme chosen with the toggle, if any.
    pub theme: Option<Theme>,
}

/// Preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct ThemeStore {
    path: PathBuf,
    payload: PreferencesPayload,
    persist_to_disk: bool,
}

impl ThemeStore {
    /// Opens the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing preferences file cannot be read.
    pub fn open() -> Result<Self, PreferencesError> {
        Self::at(default_preferences_path())
    }

    /// Opens the store at `path`; a missing, empty or unparsable file starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn at(path: PathBuf) -> Result<Self, PreferencesError> {
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload,
            persist_to_disk: true,
        })
    }

    #[must_use]
    /// In-memory store used when the configuration directory is unusable.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
            persist_to_disk: false,
        }
    }

    #[must_use]
    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    /// The saved theme, if one was chosen.
    pub fn saved_theme(&self) -> Option<Theme> {
        self.payload.theme
    }

    /// Records `theme` and writes it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_theme(&mut self, theme: Theme) -> Result<(), PreferencesError> {
        self.payload.theme = Some(theme);
        if self.persist_to_disk {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = serde_json::to_string_pretty(&self.payload)?;
            fs::write(&self.path, data)?;
        }
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            if contents.trim().is_empty() {
                return Ok(PreferencesPayload::default());
            }
            match serde_json::from_str(&contents) {
                Ok(payload) => Ok(payload),
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "ignoring unreadable preferences; they will be rewritten on the next change"
                    );
                    Ok(PreferencesPayload::default())
                }
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved preferences");
            Ok(PreferencesPayload::default())
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read preferences");
            Err(err.into())
        }
    }
}

#[must_use]
/// Reads a dark-background hint from a `COLORFGBG` value such as `"15;0"`.
pub fn prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let background: u8 = colorfgbg?.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

#[must_use]
/// Saved theme first, then the system preference, then light.
pub fn initial_theme(saved: Option<Theme>, system_prefers_dark: Option<bool>) -> Theme {
    saved.unwrap_or(match system_prefers_dark {
        Some(true) => Theme::Dark,
        _ => Theme::Light,
    })
}

#[must_use]
/// System preference taken from the terminal environment.
pub fn system_prefers_dark() -> Option<bool> {
    prefers_dark(env::var("COLORFGBG").ok().as_deref())
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
