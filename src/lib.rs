//! HSK vocabulary flashcards
//!
//! Core of the app: the vocabulary catalog, the flashcard list repository
//! (with its protected Favorites list), study-session navigation, and
//! list import/export.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod lists;
pub mod settings;
pub mod study;
pub mod transfer;
pub mod vocab;

use lists::{ListError, ListStorage};
use settings::{AppSettings, SettingsError};
use vocab::{VocabError, VocabStorage};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Vocab(#[from] VocabError),
}

/// Everything the app persists, opened once and passed to consumers
pub struct AppState {
    pub data_dir: PathBuf,
    pub settings: AppSettings,
    pub catalog: VocabStorage,
    pub lists: ListStorage,
}

impl AppState {
    /// Open (or initialize) all stores under `data_dir`
    pub fn open(data_dir: PathBuf) -> Result<Self, AppError> {
        let settings = settings::load_settings(&data_dir)?;
        let catalog = VocabStorage::open(data_dir.clone())?;
        let lists = ListStorage::open(data_dir.clone())?;

        log::info!(
            "Opened data directory {:?} ({} catalog words)",
            data_dir,
            catalog.count()
        );

        Ok(Self {
            data_dir,
            settings,
            catalog,
            lists,
        })
    }

    /// Populate the catalog from static data files if it is empty.
    /// Remembers `catalog_dir` in the settings on success.
    pub fn load_catalog(&mut self, catalog_dir: &Path) -> Result<usize, AppError> {
        let loaded = vocab::loader::load_catalog(&mut self.catalog, catalog_dir)?;
        if self.settings.catalog_dir.as_deref() != Some(catalog_dir) {
            self.settings.catalog_dir = Some(catalog_dir.to_path_buf());
            settings::save_settings(&self.data_dir, &self.settings)?;
        }
        Ok(loaded)
    }

    /// Apply `change` to the settings and persist them
    pub fn update_settings<F>(&mut self, change: F) -> Result<&AppSettings, AppError>
    where
        F: FnOnce(&mut AppSettings),
    {
        change(&mut self.settings);
        settings::save_settings(&self.data_dir, &self.settings)?;
        log::debug!("Saved settings to {:?}", settings::settings_path(&self.data_dir));
        Ok(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{VocabWord, HSK_LEVELS};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_and_load_catalog() {
        let data = TempDir::new().unwrap();
        let catalog_dir = TempDir::new().unwrap();
        for level in HSK_LEVELS {
            let words = vec![VocabWord::new(level, 1, "字", "zì", "character")];
            fs::write(
                catalog_dir.path().join(format!("hsk-{}.json", level)),
                serde_json::to_string(&words).unwrap(),
            )
            .unwrap();
        }

        let mut state = AppState::open(data.path().to_path_buf()).unwrap();
        assert_eq!(state.lists.list_all().unwrap().len(), 1);
        assert_eq!(state.load_catalog(catalog_dir.path()).unwrap(), 6);

        let reopened = AppState::open(data.path().to_path_buf()).unwrap();
        assert_eq!(reopened.catalog.count(), 6);
        assert_eq!(reopened.settings.catalog_dir.as_deref(), Some(catalog_dir.path()));
    }

    #[test]
    fn test_update_settings_persists() {
        let data = TempDir::new().unwrap();
        let mut state = AppState::open(data.path().to_path_buf()).unwrap();

        let updated = state
            .update_settings(|s| {
                s.visibility.pinyin = false;
                s.show_hints = true;
            })
            .unwrap();
        assert!(!updated.visibility.pinyin);

        let reopened = AppState::open(data.path().to_path_buf()).unwrap();
        assert!(!reopened.settings.visibility.pinyin);
        assert!(reopened.settings.visibility.hanzi);
        assert!(reopened.settings.show_hints);
    }
}
