//! Flip-card navigation over a fixed word sequence
//!
//! Pure in-memory state. `next` replays forward history before advancing
//! sequentially; `random` and `jump_to` always branch a new history entry.

use rand::Rng;
use thiserror::Error;

use super::history::History;
use crate::vocab::VocabWord;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StudyError {
    #[error("Cannot study an empty word list")]
    EmptySequence,

    #[error("Index {index} is out of range for {len} words")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, StudyError>;

#[derive(Debug, Clone)]
pub struct Navigator {
    words: Vec<VocabWord>,
    flipped: bool,
    show_hints: bool,
    history: History,
}

impl Navigator {
    /// Start at `start`, or at a random card when `start` is None
    pub fn new(words: Vec<VocabWord>, start: Option<usize>) -> Result<Self> {
        Self::with_rng(words, start, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        words: Vec<VocabWord>,
        start: Option<usize>,
        rng: &mut R,
    ) -> Result<Self> {
        if words.is_empty() {
            return Err(StudyError::EmptySequence);
        }

        let index = match start {
            Some(index) if index >= words.len() => {
                return Err(StudyError::IndexOutOfRange {
                    index,
                    len: words.len(),
                })
            }
            Some(index) => index,
            None => rng.gen_range(0..words.len()),
        };

        Ok(Self {
            words,
            flipped: false,
            show_hints: false,
            history: History::start(index),
        })
    }

    /// Start at the card with `word_id`, falling back to a random card if it is absent
    pub fn starting_at_word<R: Rng + ?Sized>(
        words: Vec<VocabWord>,
        word_id: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let start = words.iter().position(|w| w.id == word_id);
        Self::with_rng(words, start, rng)
    }

    pub fn words(&self) -> &[VocabWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index(&self) -> usize {
        self.history.current()
    }

    pub fn current(&self) -> &VocabWord {
        &self.words[self.index()]
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn set_show_hints(&mut self, show: bool) {
        self.show_hints = show;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// True when `next` would do something
    pub fn has_next(&self) -> bool {
        self.can_go_forward() || self.index() + 1 < self.words.len()
    }

    /// `(index + 1, len)`
    pub fn progress(&self) -> (usize, usize) {
        (self.index() + 1, self.words.len())
    }

    pub fn progress_percent(&self) -> f64 {
        let (done, total) = self.progress();
        done as f64 / total as f64 * 100.0
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn toggle_hints(&mut self) {
        self.show_hints = !self.show_hints;
    }

    fn settle(&mut self, history: History) {
        self.history = history;
        self.flipped = false;
    }

    /// Replay forward history if any, else advance one card. Returns false at the end.
    pub fn next(&mut self) -> bool {
        if let Some(forward) = self.history.forward() {
            self.settle(forward);
            return true;
        }

        let index = self.index();
        if index + 1 < self.words.len() {
            let branched = self.history.branch(index + 1);
            self.settle(branched);
            return true;
        }
        false
    }

    /// Step back through history. Returns false at the first visited card.
    pub fn prev(&mut self) -> bool {
        match self.history.back() {
            Some(back) => {
                self.settle(back);
                true
            }
            None => false,
        }
    }

    pub fn random(&mut self) -> bool {
        self.random_with(&mut rand::thread_rng())
    }

    /// Jump to a uniformly chosen card other than the current one
    pub fn random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let len = self.words.len();
        if len <= 1 {
            return false;
        }

        // Draw from len - 1 slots and skip over the current index
        let current = self.index();
        let mut pick = rng.gen_range(0..len - 1);
        if pick >= current {
            pick += 1;
        }

        let branched = self.history.branch(pick);
        self.settle(branched);
        true
    }

    /// Move to a specific card as a fresh history entry
    pub fn jump_to(&mut self, index: usize) -> Result<bool> {
        if index >= self.words.len() {
            return Err(StudyError::IndexOutOfRange {
                index,
                len: self.words.len(),
            });
        }
        if index == self.index() {
            return Ok(false);
        }

        let branched = self.history.branch(index);
        self.settle(branched);
        Ok(true)
    }
}
