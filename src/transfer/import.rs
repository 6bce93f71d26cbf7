use std::fs;
use std::path::Path;

use super::errors::{TransferError, TransferResult};
use super::models::{FlashcardListFile, ImportOutcome, ImportReport, FILE_VERSION};
use crate::lists::{dedup_ids, is_valid_list_id, now_millis, ListStorage, FAVORITES_ID, FAVORITES_NAME};
use crate::vocab::VocabStorage;

/// Parse and validate a list file without touching any storage
pub fn parse_document(text: &str) -> TransferResult<FlashcardListFile> {
    let mut value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| TransferError::InvalidJson(e.to_string()))?;

    let version = value
        .get("version")
        .ok_or_else(|| TransferError::Malformed("missing field `version`".to_string()))?;
    // Numeric comparison, so `1.0` is the same version as `1`
    if version.as_f64() != Some(FILE_VERSION as f64) {
        return Err(TransferError::UnsupportedVersion(version.to_string()));
    }
    value["version"] = FILE_VERSION.into();

    let file: FlashcardListFile =
        serde_json::from_value(value).map_err(|e| TransferError::Malformed(e.to_string()))?;
    normalize(file)
}

/// Bring an incoming list in line with the repository's invariants
fn normalize(mut file: FlashcardListFile) -> TransferResult<FlashcardListFile> {
    if !is_valid_list_id(&file.list.id) {
        return Err(TransferError::Malformed(format!("invalid list id '{}'", file.list.id)));
    }

    let name = file.list.name.trim().to_string();
    if name.is_empty() {
        return Err(TransferError::Malformed("list name is empty".to_string()));
    }
    file.list.name = if file.list.id == FAVORITES_ID {
        FAVORITES_NAME.to_string()
    } else {
        name
    };

    file.list.word_ids = dedup_ids(&file.list.word_ids);
    Ok(file)
}

/// Import one document: upsert its words into the catalog, then upsert the
/// list by its own id. An existing list with that id is overwritten.
pub fn import_document(
    text: &str,
    lists: &ListStorage,
    catalog: &mut VocabStorage,
) -> TransferResult<ImportOutcome> {
    let file = parse_document(text)?;

    let words_imported = file.words.len();
    catalog.bulk_put(file.words)?;

    let mut list = file.list;
    list.updated_at = now_millis();
    let is_new = lists.put_list(&list)?;

    log::info!(
        "Imported list '{}' ({} words, {})",
        list.name,
        list.word_ids.len(),
        if is_new { "new" } else { "replaced" }
    );

    Ok(ImportOutcome {
        list,
        words_imported,
        is_new,
    })
}

pub fn import_file(
    path: &Path,
    lists: &ListStorage,
    catalog: &mut VocabStorage,
) -> TransferResult<ImportOutcome> {
    if path.extension().map_or(true, |ext| ext != "json") {
        return Err(TransferError::NotJsonFile);
    }

    let text = fs::read_to_string(path)?;
    import_document(&text, lists, catalog)
}

/// Import several files. A failing file is reported and skipped; it never
/// stops the rest of the batch.
pub fn import_files<P: AsRef<Path>>(
    paths: &[P],
    lists: &ListStorage,
    catalog: &mut VocabStorage,
) -> ImportReport {
    let mut report = ImportReport::default();

    for path in paths {
        let path = path.as_ref();
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match import_file(path, lists, catalog) {
            Ok(_) => report.imported += 1,
            Err(e) => {
                log::warn!("Failed to import {:?}: {}", path, e);
                report.errors.push(format!("{}: {}", label, e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::FlashcardList;
    use crate::transfer::export::{export_list, write_export};
    use crate::vocab::VocabWord;
    use tempfile::TempDir;

    struct Fixture {
        lists: ListStorage,
        catalog: VocabStorage,
        _temp: TempDir,
    }

    fn create_fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        Fixture {
            lists: ListStorage::open(temp.path().to_path_buf()).unwrap(),
            catalog: VocabStorage::open(temp.path().to_path_buf()).unwrap(),
            _temp: temp,
        }
    }

    fn sample_file() -> FlashcardListFile {
        let mut list = FlashcardList::new("Shared".to_string());
        list.word_ids = vec!["hsk3-010".into(), "hsk3-002".into()];
        FlashcardListFile {
            version: 1,
            exported_at: "2026-01-01T00:00:00.000Z".to_string(),
            list,
            words: vec![
                VocabWord::new(3, 10, "办法", "bànfǎ", "method"),
                VocabWord::new(3, 2, "阿姨", "āyí", "aunt"),
            ],
        }
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let mut source = create_fixture();
        source
            .catalog
            .bulk_put(vec![
                VocabWord::new(1, 1, "爱", "ài", "love"),
                VocabWord::new(1, 2, "爸爸", "bàba", "dad"),
            ])
            .unwrap();
        let list = source.lists.create_list("Travel").unwrap();
        let list = source
            .lists
            .add_words(&list.id, &["hsk1-002".to_string(), "hsk1-001".to_string()])
            .unwrap();

        let out_dir = TempDir::new().unwrap();
        let path = write_export(out_dir.path(), &export_list(&list, &source.catalog)).unwrap();

        let mut target = create_fixture();
        let outcome = import_file(&path, &target.lists, &mut target.catalog).unwrap();
        assert!(outcome.is_new);

        let imported = target.lists.get_list(&list.id).unwrap();
        assert_eq!(imported.name, "Travel");
        assert_eq!(imported.word_ids, list.word_ids);
        assert_eq!(target.catalog.get_by_ids(&imported.word_ids).len(), 2);
    }

    #[test]
    fn test_import_overwrites_and_restamps() {
        let mut fx = create_fixture();
        let mut file = sample_file();
        file.list.updated_at = file.list.updated_at - chrono::Duration::days(400);
        let text = serde_json::to_string(&file).unwrap();

        let first = import_document(&text, &fx.lists, &mut fx.catalog).unwrap();
        assert!(first.is_new);
        assert_eq!(first.words_imported, 2);
        assert!(first.list.updated_at > file.list.updated_at);

        file.list.name = "Shared v2".to_string();
        file.list.word_ids = vec!["hsk3-002".into()];
        let text = serde_json::to_string(&file).unwrap();
        let second = import_document(&text, &fx.lists, &mut fx.catalog).unwrap();
        assert!(!second.is_new);

        let stored = fx.lists.get_list(&file.list.id).unwrap();
        assert_eq!(stored.name, "Shared v2");
        assert_eq!(stored.word_ids, vec!["hsk3-002".to_string()]);
        assert_eq!(stored.created_at, file.list.created_at);
    }

    #[test]
    fn test_unsupported_version_leaves_storage_untouched() {
        let mut fx = create_fixture();
        let mut value = serde_json::to_value(sample_file()).unwrap();
        value["version"] = serde_json::json!(2);

        let err = import_document(&value.to_string(), &fx.lists, &mut fx.catalog).unwrap_err();
        assert!(matches!(err, TransferError::UnsupportedVersion(ref v) if v == "2"));
        assert_eq!(fx.lists.list_all().unwrap().len(), 1);
        assert_eq!(fx.catalog.count(), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_document("not json"), Err(TransferError::InvalidJson(_))));
        assert!(matches!(parse_document("{}"), Err(TransferError::Malformed(_))));
        assert!(matches!(
            parse_document(r#"{"version":1,"words":[]}"#),
            Err(TransferError::Malformed(_))
        ));
        assert!(matches!(
            parse_document(r#"{"version":"1"}"#),
            Err(TransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            parse_document(r#"{"version":1.5}"#),
            Err(TransferError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_float_version_one_is_accepted() {
        let mut value = serde_json::to_value(sample_file()).unwrap();
        value["version"] = serde_json::json!(1.0);
        let text = value.to_string();
        assert!(text.contains("\"version\":1.0"));

        let parsed = parse_document(&text).unwrap();
        assert_eq!(parsed.version, FILE_VERSION);
        assert_eq!(parsed.list.name, "Shared");
    }

    #[test]
    fn test_normalize_incoming_list() {
        let mut file = sample_file();
        file.list.word_ids = vec!["a".into(), "b".into(), "a".into()];
        let parsed = parse_document(&serde_json::to_string(&file).unwrap()).unwrap();
        assert_eq!(parsed.list.word_ids, vec!["a".to_string(), "b".to_string()]);

        let mut fav = sample_file();
        fav.list.id = FAVORITES_ID.to_string();
        fav.list.name = "Someone else's favorites".to_string();
        let parsed = parse_document(&serde_json::to_string(&fav).unwrap()).unwrap();
        assert_eq!(parsed.list.name, FAVORITES_NAME);

        let mut bad = sample_file();
        bad.list.id = "../../x".to_string();
        assert!(matches!(
            parse_document(&serde_json::to_string(&bad).unwrap()),
            Err(TransferError::Malformed(_))
        ));

        let mut blank = sample_file();
        blank.list.name = "  ".to_string();
        assert!(matches!(
            parse_document(&serde_json::to_string(&blank).unwrap()),
            Err(TransferError::Malformed(_))
        ));
    }

    #[test]
    fn test_import_files_collects_errors() {
        let mut fx = create_fixture();
        let dir = TempDir::new().unwrap();

        let good = dir.path().join("good.json");
        fs::write(&good, serde_json::to_string(&sample_file()).unwrap()).unwrap();
        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{{{").unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "hello").unwrap();
        let mut future = serde_json::to_value(sample_file()).unwrap();
        future["version"] = serde_json::json!(2);
        let newer = dir.path().join("newer.json");
        fs::write(&newer, future.to_string()).unwrap();

        let report = import_files(&[good, garbage, notes, newer], &fx.lists, &mut fx.catalog);
        assert_eq!(report.imported, 1);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].starts_with("garbage.json: Invalid JSON"));
        assert_eq!(report.errors[1], "notes.txt: not a JSON file");
        assert_eq!(report.errors[2], "newer.json: Unsupported file version: 2");
        assert!(!report.is_clean());
    }
}
