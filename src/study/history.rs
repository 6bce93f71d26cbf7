//! Browser-style visit history for a study session
//!
//! A `History` is an immutable value: every transition returns a new one.
//! Going back and forward replays recorded entries; branching from the
//! middle discards everything ahead of the cursor.

/// Visited card indices plus a cursor into them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<usize>,
    position: usize,
}

impl History {
    /// Seed a history with its first visited index
    pub fn start(index: usize) -> Self {
        Self {
            entries: vec![index],
            position: 0,
        }
    }

    /// Index recorded at the cursor
    pub fn current(&self) -> usize {
        self.entries[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    /// Step the cursor back one entry
    pub fn back(&self) -> Option<Self> {
        if !self.can_go_back() {
            return None;
        }
        Some(Self {
            entries: self.entries.clone(),
            position: self.position - 1,
        })
    }

    /// Step the cursor forward one recorded entry
    pub fn forward(&self) -> Option<Self> {
        if !self.can_go_forward() {
            return None;
        }
        Some(Self {
            entries: self.entries.clone(),
            position: self.position + 1,
        })
    }

    /// Record a fresh visit: drop stale forward entries, append, move the cursor to it
    pub fn branch(&self, index: usize) -> Self {
        let mut entries = self.entries[..=self.position].to_vec();
        entries.push(index);
        let position = entries.len() - 1;
        Self { entries, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        let h = History::start(4);
        assert_eq!(h.entries(), &[4]);
        assert_eq!(h.current(), 4);
        assert!(!h.can_go_back());
        assert!(!h.can_go_forward());
        assert!(h.back().is_none());
        assert!(h.forward().is_none());
    }

    #[test]
    fn test_back_and_forward_replay() {
        let h = History::start(0).branch(1).branch(5);
        let back = h.back().unwrap().back().unwrap();
        assert_eq!(back.current(), 0);
        assert!(back.can_go_forward());

        let fwd = back.forward().unwrap();
        assert_eq!(fwd.current(), 1);
        assert_eq!(fwd.entries(), &[0, 1, 5]);
    }

    #[test]
    fn test_branch_truncates_forward_entries() {
        let h = History::start(0).branch(1).branch(2);
        let branched = h.back().unwrap().back().unwrap().branch(7);

        assert_eq!(branched.entries(), &[0, 7]);
        assert_eq!(branched.position(), 1);
        assert!(!branched.can_go_forward());
        // Original value is untouched
        assert_eq!(h.entries(), &[0, 1, 2]);
    }
}
