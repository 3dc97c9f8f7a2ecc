use alloc::vec::Vec;

use super::entry_id::EntryId;

/// Append-only entry storage.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, element: T) -> EntryId {
        // `EntryId::new()` accepts indexes up to and including `EntryId::MAX`.
        assert!(
            self.slots.len() <= EntryId::MAX,
            "`Arena::push()` - arena is at maximum capacity ({})",
            EntryId::MAX + 1
        );
        self.slots.push(element);
        EntryId::new(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, id: EntryId) -> &T {
        self.slots.get(id.index()).expect("`Arena::get()` - `id` is invalid!")
    }

    /// Iterates in insertion order.
    pub(crate) fn iter(&self) -> core::slice::Iter<'_, T> {
        self.slots.iter()
    }
}
