//! Which categories the user wants reflected in the charts.

use crate::ordered_set::OrderedKeySet;

/// Tracks the active category keys independently of the loaded records.
///
/// Keys left over from a previous fetch are kept; they match nothing in the
/// current records so they have no visible effect.
#[derive(Debug, Clone)]
pub struct SelectionState {
    keys: OrderedKeySet,
    auto_init_armed: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            keys: OrderedKeySet::new(),
            auto_init_armed: true,
        }
    }

    /// Flips membership of `key`, returning whether it is now selected.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Replaces the selection with exactly `universe`.
    pub fn select_all<I, S>(&mut self, universe: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.clear();
        self.keys.extend(universe);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected keys in the order they were added.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter()
    }

    pub fn as_set(&self) -> &OrderedKeySet {
        &self.keys
    }

    /// Re-arms auto-initialization for a new load cycle.
    pub fn begin_cycle(&mut self) {
        self.auto_init_armed = true;
    }

    /// Selects the whole universe when the selection is empty, at most once
    /// per load cycle. Returns `true` when the selection was initialized.
    pub fn initialize_from<I, S>(&mut self, universe: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.auto_init_armed {
            return false;
        }
        self.auto_init_armed = false;
        if !self.keys.is_empty() {
            return false;
        }
        self.select_all(universe);
        true
    }
}
