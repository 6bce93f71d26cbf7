//! One-time import of the static HSK data files
//!
//! Expects `hsk-1.json` .. `hsk-6.json` in the catalog directory, each an
//! array of `VocabWord` objects.

use std::fs;
use std::path::Path;

use super::models::{VocabWord, HSK_LEVELS};
use super::storage::{Result, VocabError, VocabStorage};

/// Load all levels into an empty catalog. Returns the number of words loaded,
/// or 0 if the catalog was already populated.
pub fn load_catalog(storage: &mut VocabStorage, catalog_dir: &Path) -> Result<usize> {
    if storage.count() > 0 {
        log::debug!("Catalog already loaded ({} words)", storage.count());
        return Ok(0);
    }

    // Read every level before writing so a missing file leaves the catalog empty
    let mut all = Vec::new();
    for level in HSK_LEVELS {
        let path = catalog_dir.join(format!("hsk-{}.json", level));
        if !path.exists() {
            return Err(VocabError::MissingLevelFile { level, path });
        }

        let content = fs::read_to_string(&path)?;
        let words: Vec<VocabWord> = serde_json::from_str(&content)?;
        log::debug!("Read {} words for HSK {}", words.len(), level);
        all.extend(words);
    }

    let loaded = all.len();
    storage.bulk_put(all)?;

    log::info!("Loaded {} words from {:?}", loaded, catalog_dir);
    Ok(loaded)
}
