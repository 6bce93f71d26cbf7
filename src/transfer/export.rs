use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::errors::TransferResult;
use super::models::{FlashcardListFile, FILE_SUFFIX, FILE_VERSION};
use crate::lists::FlashcardList;
use crate::vocab::VocabStorage;

/// Bundle a list with the catalog entries it references.
/// Ids the catalog cannot resolve are left out of `words`.
pub fn export_list(list: &FlashcardList, catalog: &VocabStorage) -> FlashcardListFile {
    let words = catalog.get_by_ids(&list.word_ids);
    if words.len() < list.word_ids.len() {
        log::warn!(
            "Exporting '{}' without {} unknown words",
            list.name,
            list.word_ids.len() - words.len()
        );
    }

    FlashcardListFile {
        version: FILE_VERSION,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        list: list.clone(),
        words,
    }
}

/// File name for an exported list: the name reduced to alphanumerics, dash,
/// underscore and space, plus the `.clmandarin.json` suffix
pub fn export_file_name(name: &str) -> String {
    format!("{}{}", file_stem(name), FILE_SUFFIX)
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    let stem = stem.trim();

    if stem.is_empty() {
        "flashcards".to_string()
    } else {
        stem.to_string()
    }
}

/// True if `path` is free, or holds an earlier export of the list `list_id`
fn can_write_to(path: &Path, list_id: &str) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return !path.exists();
    };
    serde_json::from_str::<serde_json::Value>(&content)
        .map_or(false, |v| v["list"]["id"].as_str() == Some(list_id))
}

/// Write an export document into `dir` and return its path.
///
/// Re-exporting a list replaces its earlier file. A different list whose name
/// sanitizes to the same file name gets a numbered file (`Name-2...`) instead.
pub fn write_export(dir: &Path, file: &FlashcardListFile) -> TransferResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let stem = file_stem(&file.list.name);
    let mut path = dir.join(format!("{}{}", stem, FILE_SUFFIX));
    let mut n = 2;
    while !can_write_to(&path, &file.list.id) {
        path = dir.join(format!("{}-{}{}", stem, n, FILE_SUFFIX));
        n += 1;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(file)?)?;
    fs::rename(&tmp_path, &path)?;

    log::info!("Exported '{}' ({} words) to {:?}", file.list.name, file.words.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabWord;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("HSK1 Core"), "HSK1 Core.clmandarin.json");
        assert_eq!(export_file_name("a/b:c*d_e-f"), "abcd_e-f.clmandarin.json");
        assert_eq!(export_file_name("我的词"), "flashcards.clmandarin.json");
    }

    #[test]
    fn test_export_drops_unknown_words() {
        let temp = TempDir::new().unwrap();
        let mut catalog = VocabStorage::open(temp.path().to_path_buf()).unwrap();
        catalog
            .bulk_put(vec![VocabWord::new(1, 1, "爱", "ài", "love")])
            .unwrap();

        let mut list = FlashcardList::new("Export me".to_string());
        list.word_ids = vec!["hsk1-001".into(), "hsk9-999".into()];

        let file = export_list(&list, &catalog);
        assert_eq!(file.version, 1);
        assert_eq!(file.list, list);
        assert_eq!(file.words.len(), 1);
        assert!(file.exported_at.ends_with('Z'));

        let path = write_export(temp.path(), &file).unwrap();
        assert!(path.ends_with("Export me.clmandarin.json"));
        let written: FlashcardListFile =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, file);
    }

    #[test]
    fn test_write_export_name_collisions() {
        let temp = TempDir::new().unwrap();
        let catalog = VocabStorage::open(temp.path().to_path_buf()).unwrap();
        let out = temp.path().join("out");

        let first = export_list(&FlashcardList::new("A/B".to_string()), &catalog);
        let second = export_list(&FlashcardList::new("AB".to_string()), &catalog);

        let first_path = write_export(&out, &first).unwrap();
        let second_path = write_export(&out, &second).unwrap();
        assert!(first_path.ends_with("AB.clmandarin.json"));
        assert!(second_path.ends_with("AB-2.clmandarin.json"));

        // Re-exporting reuses the list's own file
        assert_eq!(write_export(&out, &first).unwrap(), first_path);
        assert_eq!(write_export(&out, &second).unwrap(), second_path);

        let kept: FlashcardListFile =
            serde_json::from_str(&fs::read_to_string(&first_path).unwrap()).unwrap();
        assert_eq!(kept.list.id, first.list.id);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }
}
