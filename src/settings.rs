//! User settings, stored as `settings.json` in the data directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Which word fields the browser shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVisibility {
    pub hanzi: bool,
    pub pinyin: bool,
    pub english: bool,
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            hanzi: true,
            pinyin: true,
            english: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Directory holding `hsk-1.json` .. `hsk-6.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    /// Maximum number of search results
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    /// Default destination for exported lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub visibility: FieldVisibility,
    /// Start study sessions with hints shown
    #[serde(default)]
    pub show_hints: bool,
}

fn default_search_limit() -> usize {
    50
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            search_limit: default_search_limit(),
            export_dir: None,
            visibility: FieldVisibility::default(),
            show_hints: false,
        }
    }
}

/// Get the default data directory
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("clmandarin"))
        .ok_or(SettingsError::DataDirNotFound)
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Load settings, falling back to defaults when the file does not exist
pub fn load_settings(data_dir: &Path) -> Result<AppSettings> {
    let path = settings_path(data_dir);

    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(&path)?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings)
}

pub fn save_settings(data_dir: &Path, settings: &AppSettings) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(settings_path(data_dir), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(temp.path()).unwrap();
        assert_eq!(settings.search_limit, 50);
        assert!(settings.visibility.pinyin);
        assert!(!settings.show_hints);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(settings_path(temp.path()), r#"{"showHints": true}"#).unwrap();

        let settings = load_settings(temp.path()).unwrap();
        assert!(settings.show_hints);
        assert_eq!(settings.search_limit, 50);
        assert_eq!(settings.visibility, FieldVisibility::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut settings = AppSettings::default();
        settings.catalog_dir = Some(PathBuf::from("/opt/hsk"));
        settings.visibility.english = false;
        save_settings(temp.path(), &settings).unwrap();

        let loaded = load_settings(temp.path()).unwrap();
        assert_eq!(loaded.catalog_dir, Some(PathBuf::from("/opt/hsk")));
        assert!(!loaded.visibility.english);
    }
}
