//! Storage operations for flashcard lists
//!
//! Directory structure:
//! ```text
//! {data_dir}/
//! ├── active_list.json     # Currently selected list, if any
//! └── lists/
//!     └── {list-id}.json   # One file per list
//! ```
//!
//! Every mutation is a read-modify-write of a single list file, serialized
//! through `write_lock` and committed with an atomic rename. Reads take no
//! lock: they see either the old or the new file, and a list deleted
//! mid-read is treated as absent. A call that returns `Ok` is visible to
//! every later read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::*;
use crate::vocab::{VocabError, VocabStorage};

#[derive(Error, Debug)]
pub enum ListError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Vocab(#[from] VocabError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("List not found: {0}")]
    NotFound(String),

    #[error("Operation not allowed: {0}")]
    Forbidden(String),
}

pub type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveSelection {
    list_id: Option<String>,
}

/// Repository of flashcard lists, including the Favorites singleton
pub struct ListStorage {
    lists_dir: PathBuf,
    active_path: PathBuf,
    write_lock: Mutex<()>,
}

impl ListStorage {
    /// Open the repository in `data_dir`, creating Favorites if it is missing
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let lists_dir = data_dir.join("lists");
        fs::create_dir_all(&lists_dir)?;

        let storage = Self {
            lists_dir,
            active_path: data_dir.join("active_list.json"),
            write_lock: Mutex::new(()),
        };
        storage.ensure_favorites()?;
        Ok(storage)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn list_path(&self, id: &str) -> PathBuf {
        self.lists_dir.join(format!("{}.json", id))
    }

    fn read_list(&self, id: &str) -> Result<Option<FlashcardList>> {
        if !is_valid_list_id(id) {
            return Ok(None);
        }

        match read_if_exists(&self.list_path(id))? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    fn write_list(&self, list: &FlashcardList) -> Result<()> {
        let path = self.list_path(&list.id);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(list)?)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load a list, apply `mutate`, and persist it if `mutate` reports a change.
    /// `updated_at` is bumped only when something changed.
    fn update_list<F>(&self, id: &str, mutate: F) -> Result<FlashcardList>
    where
        F: FnOnce(&mut FlashcardList) -> bool,
    {
        let _guard = self.lock();
        let mut list = self
            .read_list(id)?
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;

        if mutate(&mut list) {
            list.touch();
            self.write_list(&list)?;
        }
        Ok(list)
    }

    // ==================== Listing ====================

    /// Create the Favorites list if it does not exist yet. Idempotent.
    pub fn ensure_favorites(&self) -> Result<FlashcardList> {
        let _guard = self.lock();
        if let Some(existing) = self.read_list(FAVORITES_ID)? {
            return Ok(existing);
        }

        let favorites = FlashcardList::favorites();
        self.write_list(&favorites)?;
        log::info!("Created Favorites list");
        Ok(favorites)
    }

    /// All lists, most recently updated first, with Favorites pinned at index 0
    pub fn list_all(&self) -> Result<Vec<FlashcardList>> {
        let mut lists = Vec::new();

        for entry in fs::read_dir(&self.lists_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                // Deleted since read_dir
                let Some(content) = read_if_exists(&path)? else {
                    continue;
                };
                match serde_json::from_str::<FlashcardList>(&content) {
                    Ok(list) => lists.push(list),
                    Err(e) => log::warn!("Skipping unreadable list file {:?}: {}", path, e),
                }
            }
        }

        lists.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));

        if let Some(pos) = lists.iter().position(|l| l.is_favorites()) {
            if pos > 0 {
                let favorites = lists.remove(pos);
                lists.insert(0, favorites);
            }
        }

        Ok(lists)
    }

    /// Get a specific list
    pub fn get_list(&self, id: &str) -> Result<FlashcardList> {
        self.read_list(id)?
            .ok_or_else(|| ListError::NotFound(id.to_string()))
    }

    // ==================== List Operations ====================

    /// Create a new, empty list
    pub fn create_list(&self, name: &str) -> Result<FlashcardList> {
        let name = validate_name(name)?;

        let _guard = self.lock();
        let list = FlashcardList::new(name);
        self.write_list(&list)?;

        log::info!("Created list '{}' ({})", list.name, list.id);
        Ok(list)
    }

    /// Create a list and add a single word to it
    pub fn create_list_with_word(&self, name: &str, word_id: &str) -> Result<FlashcardList> {
        let list = self.create_list(name)?;
        self.add_words(&list.id, &[word_id.to_string()])
    }

    /// Create a list holding every word of an HSK level
    pub fn create_list_with_level(
        &self,
        name: &str,
        level: u8,
        catalog: &VocabStorage,
    ) -> Result<FlashcardList> {
        // Resolve the level first so an invalid level leaves nothing behind
        let ids = level_word_ids(level, catalog)?;
        let list = self.create_list(name)?;
        self.add_words(&list.id, &ids)
    }

    pub fn rename_list(&self, id: &str, name: &str) -> Result<FlashcardList> {
        if id == FAVORITES_ID {
            return Err(ListError::Forbidden("Favorites cannot be renamed".to_string()));
        }
        let name = validate_name(name)?;

        let list = self.update_list(id, |list| {
            list.name = name;
            true
        })?;
        log::debug!("Renamed list {} to '{}'", list.id, list.name);
        Ok(list)
    }

    /// Delete a list. Clears the active selection if it pointed at this list.
    pub fn delete_list(&self, id: &str) -> Result<()> {
        if id == FAVORITES_ID {
            return Err(ListError::Forbidden("Favorites cannot be deleted".to_string()));
        }

        {
            let _guard = self.lock();
            if self.read_list(id)?.is_none() {
                return Err(ListError::NotFound(id.to_string()));
            }
            fs::remove_file(self.list_path(id))?;
        }

        if self.active_list_id()?.as_deref() == Some(id) {
            self.set_active_list(None)?;
        }

        log::info!("Deleted list {}", id);
        Ok(())
    }

    /// Insert or overwrite a list by its own id. Returns true if the id was new.
    pub fn put_list(&self, list: &FlashcardList) -> Result<bool> {
        if !is_valid_list_id(&list.id) {
            return Err(ListError::Validation(format!("invalid list id '{}'", list.id)));
        }

        let _guard = self.lock();
        let is_new = self.read_list(&list.id)?.is_none();
        self.write_list(list)?;
        Ok(is_new)
    }

    // ==================== Membership ====================

    /// Append the ids not already in the list, keeping input order.
    /// Nothing is written (and `updated_at` is untouched) if no id is new.
    pub fn add_words(&self, list_id: &str, word_ids: &[String]) -> Result<FlashcardList> {
        self.update_list(list_id, |list| {
            let fresh: Vec<String> = dedup_ids(word_ids)
                .into_iter()
                .filter(|id| !list.contains(id))
                .collect();
            if fresh.is_empty() {
                return false;
            }
            log::debug!("Adding {} words to list {}", fresh.len(), list.id);
            list.word_ids.extend(fresh);
            true
        })
    }

    /// Add every word of an HSK level, in catalog order
    pub fn add_level(&self, list_id: &str, level: u8, catalog: &VocabStorage) -> Result<FlashcardList> {
        let ids = level_word_ids(level, catalog)?;
        self.add_words(list_id, &ids)
    }

    pub fn remove_word(&self, list_id: &str, word_id: &str) -> Result<FlashcardList> {
        self.update_list(list_id, |list| {
            let before = list.word_ids.len();
            list.word_ids.retain(|id| id != word_id);
            list.word_ids.len() != before
        })
    }

    /// Replace the membership verbatim. The caller supplies a permutation of
    /// the current ids; set equality is not re-checked.
    pub fn reorder(&self, list_id: &str, new_order: Vec<String>) -> Result<FlashcardList> {
        self.update_list(list_id, |list| {
            list.word_ids = new_order;
            true
        })
    }

    // ==================== Favorites ====================

    pub fn is_favorite(&self, word_id: &str) -> Result<bool> {
        Ok(self
            .read_list(FAVORITES_ID)?
            .map_or(false, |fav| fav.contains(word_id)))
    }

    /// Add or remove a word from Favorites. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, word_id: &str) -> Result<bool> {
        self.ensure_favorites()?;

        let mut now_favorite = false;
        self.update_list(FAVORITES_ID, |fav| {
            if fav.contains(word_id) {
                fav.word_ids.retain(|id| id != word_id);
            } else {
                fav.word_ids.push(word_id.to_string());
                now_favorite = true;
            }
            true
        })?;
        Ok(now_favorite)
    }

    // ==================== Active Selection ====================

    pub fn active_list_id(&self) -> Result<Option<String>> {
        let Some(content) = read_if_exists(&self.active_path)? else {
            return Ok(None);
        };
        let selection: ActiveSelection = serde_json::from_str(&content)?;
        Ok(selection.list_id)
    }

    /// The selected list, or None if nothing is selected or it no longer exists
    pub fn active_list(&self) -> Result<Option<FlashcardList>> {
        match self.active_list_id()? {
            Some(id) => self.read_list(&id),
            None => Ok(None),
        }
    }

    pub fn set_active_list(&self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.read_list(id)?.is_none() {
                return Err(ListError::NotFound(id.to_string()));
            }
        }

        let selection = ActiveSelection {
            list_id: id.map(str::to_string),
        };
        let tmp_path = self.active_path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&selection)?)?;
        fs::rename(&tmp_path, &self.active_path)?;
        Ok(())
    }
}

/// Read a file, treating a missing file as `None`. Readers do not take the
/// write lock, so a file seen a moment ago may already be gone.
fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ListError::Validation("list name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn level_word_ids(level: u8, catalog: &VocabStorage) -> Result<Vec<String>> {
    Ok(catalog
        .get_by_level(level)?
        .into_iter()
        .map(|w| w.id)
        .collect())
}
