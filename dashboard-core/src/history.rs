use std::collections::VecDeque;

/// Maximum number of names kept in [`SearchHistory`].
pub const HISTORY_CAPACITY: usize = 5;

/// Recently searched location names, most recent first, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `name` to the front, dropping any earlier occurrence (exact, case-sensitive)
    /// and anything past [`HISTORY_CAPACITY`].
    pub fn record(&mut self, name: &str) {
        self.entries.retain(|entry| entry != name);
        self.entries.push_front(name.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
