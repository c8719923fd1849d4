//! Ordered identifier index.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::hash::Hash;

/// Set of unique identifiers that enumerates in first-insertion order.
///
/// Persisted as a plain ordered list. Duplicates in persisted data are
/// dropped on load, keeping the earliest position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    ids: Vec<T>,
    members: HashSet<T>,
}

impl<T> IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Returns `true` when `id` is present.
    #[must_use]
    pub fn contains(&self, id: &T) -> bool {
        self.members.contains(id)
    }

    /// Adds `id`, returning `true` when it was not already present.
    ///
    /// Re-adding an existing identifier keeps its original position.
    pub fn add(&mut self, id: T) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`, returning `true` when it was present.
    pub fn remove(&mut self, id: &T) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.ids.retain(|existing| existing != id);
        true
    }

    /// Returns the number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when the index holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates identifiers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.ids.iter()
    }

    /// Returns the identifiers in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.ids
    }
}

impl<T> Default for IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<T> Extend<T> for IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for id in iter {
            self.add(id);
        }
    }
}

impl<'a, T> IntoIterator for &'a IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Serialize for IdIndex<T>
where
    T: Clone + Eq + Hash + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for IdIndex<T>
where
    T: Clone + Eq + Hash + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}
