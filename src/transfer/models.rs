//! The portable list file format

use serde::{Deserialize, Serialize};

use crate::lists::FlashcardList;
use crate::vocab::VocabWord;

/// The only file format version this build reads and writes
pub const FILE_VERSION: u64 = 1;

/// Suffix appended to exported file names
pub const FILE_SUFFIX: &str = ".clmandarin.json";

/// A list plus the words it references, so it can be imported on a device
/// that lacks some of those ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardListFile {
    pub version: u64,
    #[serde(default)]
    pub exported_at: String,
    pub list: FlashcardList,
    #[serde(default)]
    pub words: Vec<VocabWord>,
}

/// Result of importing one document
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub list: FlashcardList,
    pub words_imported: usize,
    /// False when an existing list with the same id was overwritten
    pub is_new: bool,
}

/// Result of importing a batch of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// One `"{file}: {reason}"` entry per failed file
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
