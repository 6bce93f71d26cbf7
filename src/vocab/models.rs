//! Data models for the vocabulary catalog

use serde::{Deserialize, Serialize};

/// HSK levels shipped with the catalog
pub const HSK_LEVELS: [u8; 6] = [1, 2, 3, 4, 5, 6];

/// A single catalog entry. Immutable once loaded; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWord {
    /// Stable id, `hsk{level}-{3-digit sequence}`
    pub id: String,
    pub hsk_level: u8,
    /// 1-based rank within its level
    pub number: u32,
    pub hanzi: String,
    pub pinyin: String,
    #[serde(default)]
    pub english: String,
}

impl VocabWord {
    pub fn new(level: u8, number: u32, hanzi: &str, pinyin: &str, english: &str) -> Self {
        Self {
            id: word_id(level, number),
            hsk_level: level,
            number,
            hanzi: hanzi.to_string(),
            pinyin: pinyin.to_string(),
            english: english.to_string(),
        }
    }

    /// Case-insensitive substring match against hanzi, pinyin and english.
    /// `needle` must already be trimmed and lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.hanzi.to_lowercase().contains(needle)
            || self.pinyin.to_lowercase().contains(needle)
            || self.english.to_lowercase().contains(needle)
    }

    /// Sort key giving catalog order (level, then rank)
    pub fn catalog_key(&self) -> (u8, u32) {
        (self.hsk_level, self.number)
    }
}

/// Build the canonical id for a word
pub fn word_id(level: u8, number: u32) -> String {
    format!("hsk{}-{:03}", level, number)
}

pub fn is_valid_level(level: u8) -> bool {
    HSK_LEVELS.contains(&level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_id_padding() {
        assert_eq!(word_id(1, 7), "hsk1-007");
        assert_eq!(word_id(6, 1234), "hsk6-1234");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let word = VocabWord::new(1, 1, "爱", "ài", "Love");
        assert!(word.matches("love"));
        assert!(word.matches("爱"));
        assert!(word.matches("ài"));
        assert!(!word.matches("hate"));
    }

    #[test]
    fn test_missing_english_defaults_to_empty() {
        let json = r#"{"id":"hsk1-001","hskLevel":1,"number":1,"hanzi":"爱","pinyin":"ài"}"#;
        let word: VocabWord = serde_json::from_str(json).unwrap();
        assert_eq!(word.english, "");
    }
}
