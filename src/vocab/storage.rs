//! Catalog storage
//!
//! The whole catalog lives in `{data_dir}/vocab.json` and is held in memory
//! once opened. Lookups never touch disk; upserts rewrite the file atomically.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::models::{is_valid_level, VocabWord};

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid HSK level: {0}")]
    InvalidLevel(u8),

    #[error("Missing data file for HSK {level}: {path}")]
    MissingLevelFile { level: u8, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, VocabError>;

/// Embedded catalog database, keyed by word id
pub struct VocabStorage {
    path: PathBuf,
    words: HashMap<String, VocabWord>,
}

impl VocabStorage {
    /// Open the catalog in `data_dir`, creating the directory if needed
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        let path = data_dir.join("vocab.json");

        let words = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let list: Vec<VocabWord> = serde_json::from_str(&content)?;
            list.into_iter().map(|w| (w.id.clone(), w)).collect()
        } else {
            HashMap::new()
        };

        log::debug!("Opened catalog at {:?} ({} words)", path, words.len());
        Ok(Self { path, words })
    }

    fn save(&self) -> Result<()> {
        let mut all: Vec<&VocabWord> = self.words.values().collect();
        all.sort_by(|a, b| a.catalog_key().cmp(&b.catalog_key()).then_with(|| a.id.cmp(&b.id)));

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string(&all)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.words.len()
    }

    pub fn get(&self, id: &str) -> Option<&VocabWord> {
        self.words.get(id)
    }

    /// All words of a level, sorted by rank
    pub fn get_by_level(&self, level: u8) -> Result<Vec<VocabWord>> {
        if !is_valid_level(level) {
            return Err(VocabError::InvalidLevel(level));
        }

        let mut words: Vec<VocabWord> = self
            .words
            .values()
            .filter(|w| w.hsk_level == level)
            .cloned()
            .collect();
        words.sort_by_key(|w| w.number);
        Ok(words)
    }

    /// Resolve ids to words. Unknown ids are silently dropped; results follow input order.
    pub fn get_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<VocabWord> {
        ids.iter()
            .filter_map(|id| self.words.get(id.as_ref()))
            .cloned()
            .collect()
    }

    /// Substring search over hanzi, pinyin and english.
    /// An empty query yields no results; at most `limit` words are returned.
    pub fn search(&self, query: &str, limit: usize) -> Vec<VocabWord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<&VocabWord> = self.words.values().filter(|w| w.matches(&needle)).collect();
        hits.sort_by_key(|w| w.catalog_key());
        hits.into_iter().take(limit).cloned().collect()
    }

    /// Insert or replace words by id, then persist
    pub fn bulk_put(&mut self, words: Vec<VocabWord>) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let count = words.len();
        for word in words {
            self.words.insert(word.id.clone(), word);
        }
        self.save()?;

        log::debug!("Upserted {} words into catalog", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (VocabStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = VocabStorage::open(temp_dir.path().to_path_buf()).unwrap();
        storage
            .bulk_put(vec![
                VocabWord::new(1, 2, "爸爸", "bàba", "dad"),
                VocabWord::new(1, 1, "爱", "ài", "love"),
                VocabWord::new(2, 1, "吧", "ba", "modal particle"),
                VocabWord::new(1, 3, "杯子", "bēizi", "cup"),
            ])
            .unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_get_by_level_sorted_by_number() {
        let (storage, _temp) = create_test_storage();

        let words = storage.get_by_level(1).unwrap();
        let ids: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["hsk1-001", "hsk1-002", "hsk1-003"]);
    }

    #[test]
    fn test_get_by_level_rejects_unknown_level() {
        let (storage, _temp) = create_test_storage();
        assert!(matches!(storage.get_by_level(7), Err(VocabError::InvalidLevel(7))));
    }

    #[test]
    fn test_get_by_ids_drops_unknown() {
        let (storage, _temp) = create_test_storage();

        let words = storage.get_by_ids(&["hsk1-003", "nope", "hsk2-001"]);
        let ids: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["hsk1-003", "hsk2-001"]);
    }

    #[test]
    fn test_search() {
        let (storage, _temp) = create_test_storage();

        assert!(storage.search("   ", 50).is_empty());

        let hits = storage.search("  BA ", 50);
        let ids: Vec<&str> = hits.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["hsk1-002", "hsk2-001"]);

        assert_eq!(storage.search("ba", 1).len(), 1);
        assert_eq!(storage.search("杯", 50)[0].id, "hsk1-003");
    }

    #[test]
    fn test_bulk_put_persists_and_upserts() {
        let (mut storage, temp) = create_test_storage();

        let mut changed = storage.get("hsk1-001").unwrap().clone();
        changed.english = "to love".to_string();
        storage.bulk_put(vec![changed]).unwrap();

        let reopened = VocabStorage::open(temp.path().to_path_buf()).unwrap();
        assert_eq!(reopened.count(), 4);
        assert_eq!(reopened.get("hsk1-001").unwrap().english, "to love");
    }
}
