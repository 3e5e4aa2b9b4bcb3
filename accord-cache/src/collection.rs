use crate::Cached;
use accord_model::Entity;
use std::collections::HashMap;

/// Ordered keyed collection returned by list fetches.
///
/// Every fetch builds a new collection; entries are the same live handles the
/// store holds. Order is the order the server returned.
pub struct Collection<T: Entity> {
    entries: Vec<Cached<T>>,
    index: HashMap<T::Key, usize>,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `handle`. A repeated key replaces the earlier entry in place.
    pub fn push(&mut self, handle: Cached<T>) {
        let key = handle.id();
        match self.index.get(&key) {
            Some(&position) => self.entries[position] = handle,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(handle);
            }
        }
    }

    pub fn get(&self, key: &T::Key) -> Option<&Cached<T>> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn first(&self) -> Option<&Cached<T>> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&Cached<T>> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cached<T>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<T::Key> {
        self.entries.iter().map(Cached::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Cached<T>> {
        self.entries
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: Entity> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T: Entity> FromIterator<Cached<T>> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = Cached<T>>>(iter: I) -> Self {
        let mut collection = Self::new();
        for handle in iter {
            collection.push(handle);
        }
        collection
    }
}

impl<T: Entity> IntoIterator for Collection<T> {
    type Item = Cached<T>;
    type IntoIter = std::vec::IntoIter<Cached<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Collection<T> {
    type Item = &'a Cached<T>;
    type IntoIter = std::slice::Iter<'a, Cached<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
