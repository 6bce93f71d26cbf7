use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use clmandarin_lib::lists::FlashcardList;
use clmandarin_lib::settings;
use clmandarin_lib::vocab::VocabWord;
use clmandarin_lib::AppState;

/// Shared application state for CLI commands
pub struct App {
    pub state: AppState,
}

impl App {
    /// Open the given data directory, or the platform default
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => settings::default_data_dir().context("Failed to get data directory")?,
        };

        let state = AppState::open(data_dir.clone())
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Ok(Self { state })
    }

    /// Find a list by id, id prefix, or name (case-insensitive, prefix match)
    pub fn find_list(&self, query: &str) -> Result<FlashcardList> {
        let lists = self.state.lists.list_all().context("Failed to list flashcard lists")?;
        let query_lower = query.to_lowercase();

        // Exact match first
        if let Some(list) = lists
            .iter()
            .find(|l| l.id == query || l.name.to_lowercase() == query_lower)
        {
            return Ok(list.clone());
        }

        // Prefix match
        let matches: Vec<&FlashcardList> = lists
            .iter()
            .filter(|l| l.id.starts_with(query) || l.name.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!("No list matching '{}'. Available lists:\n{}", query,
                lists.iter().map(|l| format!("  - {}", l.name)).collect::<Vec<_>>().join("\n")),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous list '{}'. Matches:\n{}", query,
                matches.iter().map(|l| format!("  - {} ({})", l.name, l.id)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// The list named on the command line, or else the active list
    pub fn list_or_active(&self, query: Option<&str>) -> Result<FlashcardList> {
        if let Some(query) = query {
            return self.find_list(query);
        }

        match self.state.lists.active_list().context("Failed to read active list")? {
            Some(list) => Ok(list),
            None => bail!("No list given and no list selected. Use `lists select <list>` or --list."),
        }
    }

    /// Resolve a word by id, or by exact hanzi when that is unambiguous
    pub fn resolve_word(&self, query: &str) -> Result<VocabWord> {
        let catalog = &self.state.catalog;
        if let Some(word) = catalog.get(query) {
            return Ok(word.clone());
        }

        let mut matches: Vec<VocabWord> = catalog
            .search(query, usize::MAX)
            .into_iter()
            .filter(|w| w.hanzi == query)
            .collect();

        match matches.len() {
            0 => bail!("No word '{}' in the catalog. Did you run `init`?", query),
            1 => Ok(matches.remove(0)),
            _ => bail!("Ambiguous word '{}'. Matches:\n{}", query,
                matches.iter().map(|w| format!("  - {} {} ({})", w.id, w.pinyin, w.english)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Resolve several words, keeping their ids in argument order
    pub fn resolve_word_ids(&self, queries: &[String]) -> Result<Vec<String>> {
        queries
            .iter()
            .map(|q| self.resolve_word(q).map(|w| w.id))
            .collect()
    }
}
