//! Building study sessions from lists, levels, or explicit word sequences

use rand::Rng;
use thiserror::Error;

use super::navigator::{Navigator, StudyError};
use crate::lists::FlashcardList;
use crate::vocab::{VocabError, VocabStorage, VocabWord};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Study(#[from] StudyError),

    #[error(transparent)]
    Vocab(#[from] VocabError),
}

/// One run of the flip-card flow over a fixed word sequence
#[derive(Debug, Clone)]
pub struct StudySession {
    pub name: String,
    pub navigator: Navigator,
}

impl StudySession {
    /// Study an explicit sequence, optionally starting at a given word
    pub fn for_words<R: Rng + ?Sized>(
        name: String,
        words: Vec<VocabWord>,
        start_word: Option<&str>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let navigator = match start_word {
            Some(word_id) => Navigator::starting_at_word(words, word_id, rng)?,
            None => Navigator::with_rng(words, None, rng)?,
        };
        Ok(Self { name, navigator })
    }

    /// Study a list in its own order. Ids the catalog cannot resolve are skipped.
    pub fn for_list<R: Rng + ?Sized>(
        list: &FlashcardList,
        catalog: &VocabStorage,
        start_word: Option<&str>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let words = catalog.get_by_ids(&list.word_ids);
        if words.len() < list.word_ids.len() {
            log::warn!(
                "List '{}' references {} unknown words",
                list.name,
                list.word_ids.len() - words.len()
            );
        }
        Self::for_words(list.name.clone(), words, start_word, rng)
    }

    /// Study a whole HSK level in rank order
    pub fn for_level<R: Rng + ?Sized>(
        level: u8,
        catalog: &VocabStorage,
        start_word: Option<&str>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let words = catalog.get_by_level(level)?;
        Self::for_words(format!("HSK {}", level), words, start_word, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn create_catalog() -> (VocabStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = VocabStorage::open(temp_dir.path().to_path_buf()).unwrap();
        catalog
            .bulk_put(vec![
                VocabWord::new(1, 1, "爱", "ài", "love"),
                VocabWord::new(1, 2, "爸爸", "bàba", "dad"),
                VocabWord::new(1, 3, "杯子", "bēizi", "cup"),
            ])
            .unwrap();
        (catalog, temp_dir)
    }

    #[test]
    fn test_for_list_keeps_list_order() {
        let (catalog, _temp) = create_catalog();
        let mut rng = StdRng::seed_from_u64(0);
        let mut list = FlashcardList::new("Mixed".to_string());
        list.word_ids = vec!["hsk1-003".into(), "ghost".into(), "hsk1-001".into()];

        let session = StudySession::for_list(&list, &catalog, Some("hsk1-001"), &mut rng).unwrap();
        let ids: Vec<&str> = session.navigator.words().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["hsk1-003", "hsk1-001"]);
        assert_eq!(session.navigator.index(), 1);
        assert_eq!(session.name, "Mixed");
    }

    #[test]
    fn test_for_list_empty() {
        let (catalog, _temp) = create_catalog();
        let mut rng = StdRng::seed_from_u64(0);
        let list = FlashcardList::new("Empty".to_string());

        let err = StudySession::for_list(&list, &catalog, None, &mut rng).unwrap_err();
        assert!(matches!(err, SessionError::Study(StudyError::EmptySequence)));
    }

    #[test]
    fn test_for_level() {
        let (catalog, _temp) = create_catalog();
        let mut rng = StdRng::seed_from_u64(0);

        let session = StudySession::for_level(1, &catalog, Some("hsk1-002"), &mut rng).unwrap();
        assert_eq!(session.name, "HSK 1");
        assert_eq!(session.navigator.len(), 3);
        assert_eq!(session.navigator.current().hanzi, "爸爸");
    }
}
