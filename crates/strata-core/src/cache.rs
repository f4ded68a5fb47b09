//! Navigation cache — one directory listing per tree-depth level.
//!
//! The controller produces depth keys as a monotonic counter clamped into
//! `[0, capacity)`, so a plain slot vector indexed by `key % capacity` is
//! the whole data structure. Each slot exclusively owns its listing; `set`
//! drops the previous occupant before installing the replacement.

use crate::listing::DirectoryListing;

/// Number of depth levels remembered at once.
pub const CAPACITY: usize = 64;

pub struct NavigationCache {
    slots: Vec<Option<DirectoryListing>>,
}

impl NavigationCache {
    /// Pre-create `capacity` empty slots. The cache exists for the whole
    /// life of the browser; this runs once at startup.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn index(&self, key: usize) -> usize {
        key % self.slots.len()
    }

    /// The listing currently held for `key`, if any.
    pub fn get(&self, key: usize) -> Option<&DirectoryListing> {
        self.slots[self.index(key)].as_ref()
    }

    /// Install `listing` for `key`, dropping whatever the slot held before.
    pub fn set(&mut self, key: usize, listing: DirectoryListing) {
        let idx = self.index(key);
        // Destroy the previous occupant first; the slot never owns two.
        self.slots[idx].take();
        self.slots[idx] = Some(listing);
    }
}

impl Default for NavigationCache {
    fn default() -> Self {
        Self::new(CAPACITY)
    }
}
