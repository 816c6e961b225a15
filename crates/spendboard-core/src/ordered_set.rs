//! Insertion-ordered set of category keys.

use std::collections::HashSet;

/// A set of keys that remembers the order in which keys were first inserted.
///
/// Equality is set equality: two sets holding the same keys compare equal
/// regardless of insertion order. Iteration always follows insertion order,
/// which is what the first-seen tie-break rules rely on.
#[derive(Debug, Clone, Default)]
pub struct OrderedKeySet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl OrderedKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, returning `false` when it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.members.contains(&key) {
            return false;
        }
        self.members.insert(key.clone());
        self.order.push(key);
        true
    }

    /// Removes `key`, returning `false` when it was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.members.remove(key) {
            return false;
        }
        self.order.retain(|existing| existing != key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.members.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl PartialEq for OrderedKeySet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for OrderedKeySet {}

impl<S: Into<String>> FromIterator<S> for OrderedKeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for OrderedKeySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
