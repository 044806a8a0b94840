/// Theme preference persistence
///
/// The one durable value in the application: which theme the user last
/// chose. It is read once at startup and written on every toggle; there
/// are no concurrent writers. A missing or corrupt file silently falls
/// back to the default.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

const PREFS_FILENAME: &str = "prefs.json";

/// Directory name under the user config dir
const APP_DIR: &str = "meme-gallery";

/// The two legal theme values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Label for the toggle control, describing what a press switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemePreference::Light => "Dark mode",
            ThemePreference::Dark => "Light mode",
        }
    }
}

/// On-disk shape of the preference file
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    theme: ThemePreference,
}

fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Read the saved theme, defaulting when there is nothing usable
pub fn load() -> ThemePreference {
    config_dir()
        .map(|dir| load_from(&dir))
        .unwrap_or_default()
}

/// Persist the theme choice
pub fn save(theme: ThemePreference) -> Result<(), GalleryError> {
    let dir = config_dir().ok_or(GalleryError::NoConfigDir)?;
    save_to(&dir, theme)
}

/// Read the theme from an explicit directory. Missing file, unreadable
/// file, and unparseable content all fall back to the default.
pub fn load_from(dir: &Path) -> ThemePreference {
    let path = dir.join(PREFS_FILENAME);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return ThemePreference::default(),
    };
    match serde_json::from_str::<PrefsFile>(&content) {
        Ok(prefs) => prefs.theme,
        Err(_) => ThemePreference::default(),
    }
}

/// Write the theme to an explicit directory, creating it if needed
pub fn save_to(dir: &Path, theme: ThemePreference) -> Result<(), GalleryError> {
    let path = dir.join(PREFS_FILENAME);
    let write = || -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(&PrefsFile { theme })?;
        std::fs::write(&path, json)
    };
    write().map_err(|source| GalleryError::PrefsWrite {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        save_to(tmp.path(), ThemePreference::Dark).unwrap();
        assert_eq!(load_from(tmp.path()), ThemePreference::Dark);

        save_to(tmp.path(), ThemePreference::Light).unwrap();
        assert_eq!(load_from(tmp.path()), ThemePreference::Light);
    }

    #[test]
    fn missing_file_defaults_to_light() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_from(tmp.path()), ThemePreference::Light);
    }

    #[test]
    fn corrupt_file_defaults_to_light() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(PREFS_FILENAME), "{ not json").unwrap();
        assert_eq!(load_from(tmp.path()), ThemePreference::Light);
    }

    #[test]
    fn unknown_theme_value_defaults_to_light() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(PREFS_FILENAME), r#"{"theme": "retro"}"#).unwrap();
        assert_eq!(load_from(tmp.path()), ThemePreference::Light);
    }

    #[test]
    fn file_uses_lowercase_theme_names() {
        let tmp = TempDir::new().unwrap();
        save_to(tmp.path(), ThemePreference::Dark).unwrap();
        let content = std::fs::read_to_string(tmp.path().join(PREFS_FILENAME)).unwrap();
        assert!(content.contains(r#""dark""#));
    }

    #[test]
    fn toggled_flips_between_the_two_values() {
        assert_eq!(
            ThemePreference::Light.toggled(),
            ThemePreference::Dark
        );
        assert_eq!(
            ThemePreference::Dark.toggled().toggled(),
            ThemePreference::Dark
        );
    }

    #[test]
    fn save_creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        save_to(&nested, ThemePreference::Dark).unwrap();
        assert_eq!(load_from(&nested), ThemePreference::Dark);
    }
}
