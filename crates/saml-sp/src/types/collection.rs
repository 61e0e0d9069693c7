//! Typed, keyed descriptor collections.
//!
//! Metadata documents allow at most one entry per key for some descriptors
//! (one contact per contact type, one organization translation per
//! language). [`DescriptorSet`] keeps insertion order and replaces an entry
//! in place when a descriptor with the same key is inserted again.

use std::slice;

/// A descriptor that is unique per key within a [`DescriptorSet`].
pub trait Keyed {
    /// The key type.
    type Key: PartialEq + ?Sized;

    /// Returns the key of this descriptor.
    fn key(&self) -> &Self::Key;
}

/// Ordered collection of descriptors, unique by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSet<T> {
    items: Vec<T>,
}

impl<T> DescriptorSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the descriptors in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the descriptors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Keyed> DescriptorSet<T> {
    /// Inserts a descriptor.
    ///
    /// If a descriptor with the same key exists it is replaced in place and
    /// returned.
    pub fn insert(&mut self, item: T) -> Option<T> {
        match self.items.iter().position(|existing| existing.key() == item.key()) {
            Some(index) => Some(std::mem::replace(&mut self.items[index], item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Looks up a descriptor by key.
    #[must_use]
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Returns true if a descriptor with this key is present.
    #[must_use]
    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.get(key).is_some()
    }
}

impl<T> Default for DescriptorSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> Extend<T> for DescriptorSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Keyed> FromIterator<T> for DescriptorSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a DescriptorSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for DescriptorSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
