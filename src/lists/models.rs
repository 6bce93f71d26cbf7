//! Data models for flashcard lists

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved id of the Favorites list
pub const FAVORITES_ID: &str = "__favorites__";

/// Display name of the Favorites list
pub const FAVORITES_NAME: &str = "Favorites";

const MAX_ID_LEN: usize = 128;

/// A user-curated, ordered set of catalog word ids.
///
/// Only ids are stored here; word content is resolved against the catalog.
/// Timestamps are kept at millisecond precision so they survive a round trip
/// through the on-disk format unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardList {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub word_ids: Vec<String>,
}

impl FlashcardList {
    pub fn new(name: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn favorites() -> Self {
        Self::with_id(FAVORITES_ID.to_string(), FAVORITES_NAME.to_string())
    }

    fn with_id(id: String, name: String) -> Self {
        let now = now_millis();
        Self {
            id,
            name,
            description: None,
            created_at: now,
            updated_at: now,
            word_ids: Vec::new(),
        }
    }

    pub fn is_favorites(&self) -> bool {
        self.id == FAVORITES_ID
    }

    pub fn contains(&self, word_id: &str) -> bool {
        self.word_ids.iter().any(|id| id == word_id)
    }

    /// Bump `updated_at`, never moving it backwards
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
    }
}

/// Current time truncated to milliseconds
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Ids double as file names, so they are restricted to `[A-Za-z0-9_-]`
pub fn is_valid_list_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Collapse repeated ids, keeping the first occurrence
pub fn dedup_ids(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().filter(|id| seen.insert(id.as_str())).cloned().collect()
}
