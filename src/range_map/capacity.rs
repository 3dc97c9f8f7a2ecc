use core::cmp::Ordering;

use spin::rwlock::RwLock;

use super::RangeMap;
use crate::raw::RawRangeMap;

impl<K: Ord, V> RangeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries
    /// before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::RangeMap;
    ///
    /// let map: RangeMap<i32, i32> = RangeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, K::cmp)
    }
}

impl<K, V, C> RangeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Creates an empty map ordering keys by `compare`, with room for at
    /// least `capacity` entries.
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        RangeMap {
            raw: RwLock::new(RawRangeMap::with_capacity(capacity)),
            compare,
        }
    }

    /// Returns how many entries the map can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn capacity(&self) -> usize {
        self.raw.read().capacity()
    }
}
