use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use spin::rwlock::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Error;
use crate::Range;
use crate::raw::{Entry, RawRangeMap, Scan};

mod capacity;

/// A thread-safe, non-unique map from ranges to values, answering overlap queries.
///
/// Any number of values may be stored under the same or overlapping ranges;
/// nothing is ever replaced or removed. Ranges are compared with the map's
/// comparator, which defaults to the key type's [`Ord`] implementation and can
/// be replaced with [`RangeMap::with_comparator`].
///
/// Each entry is stored once and indexed twice, by range start and by range
/// end. [`put`](RangeMap::put) only appends, leaving the indexes unsorted; the
/// next query sorts them again. A query binary-searches both indexes to
/// bound the entries that can overlap, then scans the shorter of the two
/// candidate windows.
///
/// # Locking
///
/// All state sits behind a single reader-writer lock. `put` takes it for
/// writing. A query takes it for reading, except that the first query after a
/// `put` briefly holds it for writing while it re-sorts, blocking other
/// readers. The iterators returned by queries hold the read lock until they
/// are dropped, so calling `put` on a thread that still holds one of them for
/// the same map will never return.
///
/// # Examples
///
/// ```
/// use overlap_map::RangeMap;
///
/// let map = RangeMap::new();
/// map.put((1, 5), "a").unwrap();
/// map.put((4, 10), "b").unwrap();
/// map.put((20, 30), "c").unwrap();
///
/// let mut hits: Vec<_> = map.overlapping((3, 6)).unwrap().collect();
/// hits.sort_unstable();
/// assert_eq!(hits, ["a", "b"]);
///
/// // Ranges touching at a single boundary do not overlap.
/// assert_eq!(map.overlapping((10, 20)).unwrap().count(), 0);
/// ```
pub struct RangeMap<K, V, C = fn(&K, &K) -> Ordering> {
    raw: RwLock<RawRangeMap<K, V>>,
    compare: C,
}

/// A lazy iterator over the entries of a [`RangeMap`] overlapping a query range.
///
/// This `struct` is created by the [`overlapping`] and
/// [`overlapping_entries`] methods on [`RangeMap`]. It knows exactly how many
/// items remain, and holds the map's read lock until dropped.
///
/// [`overlapping`]: RangeMap::overlapping
/// [`overlapping_entries`]: RangeMap::overlapping_entries
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Overlapping<'a, K, V, C, T = V> {
    raw: RwLockReadGuard<'a, RawRangeMap<K, V>>,
    compare: &'a C,
    query: Range<K>,
    scan: Scan,
    project: fn(&Entry<K, V>) -> T,
}

/// An [`Overlapping`] iterator yielding `(range, value)` pairs.
pub type OverlappingEntries<'a, K, V, C> = Overlapping<'a, K, V, C, (Range<K>, V)>;

impl<K: Ord, V> RangeMap<K, V> {
    /// Makes a new, empty `RangeMap` ordering keys by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::RangeMap;
    ///
    /// let map: RangeMap<u32, &str> = RangeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }
}

impl<K, V, C> RangeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Makes a new, empty `RangeMap` ordering keys by `compare`.
    ///
    /// Ranges passed to the map must be in order under `compare`, which is
    /// also how a wrap-around key domain is expressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::RangeMap;
    ///
    /// // Keys descend.
    /// let map = RangeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.put((10, 4), "b").unwrap();
    /// assert!(map.put((4, 10), "a").is_err());
    /// assert_eq!(map.overlapping((6, 0)).unwrap().collect::<Vec<_>>(), ["b"]);
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        RangeMap {
            raw: RwLock::new(RawRangeMap::new()),
            compare,
        }
    }

    /// Returns the number of stored entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::RangeMap;
    ///
    /// let map = RangeMap::new();
    /// map.put((1, 2), 'x').unwrap();
    /// map.put((1, 2), 'x').unwrap();
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.raw.read().len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.raw.read().is_empty()
    }

    /// Stores `value` under `range`.
    ///
    /// Duplicate and overlapping ranges are all kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrder`] if `range.from` sorts after `range.to`.
    ///
    /// # Complexity
    ///
    /// Amortized O(1); the sorting cost is paid by the next query.
    pub fn put<R>(&self, range: R, value: V) -> Result<(), Error>
    where
        R: Into<Range<K>>,
    {
        let range = self.in_order(range.into())?;
        self.raw.write().push(range, value);
        Ok(())
    }

    /// Returns the values whose range overlaps `range`.
    ///
    /// Overlap follows [`Range::is_overlapping_by`]: equal ranges overlap, and
    /// otherwise a boundary of one range must lie strictly inside the other.
    /// Values are yielded in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrder`] if `range.from` sorts after `range.to`.
    ///
    /// # Complexity
    ///
    /// O(log n) to set up, plus the length of the scanned window. The first
    /// query after a `put` also sorts, O(n log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::{Error, RangeMap};
    ///
    /// let map = RangeMap::new();
    /// map.put(0..10, 1).unwrap();
    /// map.put(5..15, 2).unwrap();
    ///
    /// let total: i32 = map.overlapping(8..9).unwrap().sum();
    /// assert_eq!(total, 3);
    /// assert_eq!(map.overlapping((9, 8)).err(), Some(Error::OutOfOrder));
    /// ```
    pub fn overlapping<R>(&self, range: R) -> Result<Overlapping<'_, K, V, C>, Error>
    where
        R: Into<Range<K>>,
        V: Clone,
    {
        self.query(range.into(), |entry: &Entry<K, V>| entry.value.clone())
    }

    /// Returns the `(range, value)` pairs whose range overlaps `range`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrder`] if `range.from` sorts after `range.to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::{Range, RangeMap};
    ///
    /// let map = RangeMap::new();
    /// map.put((1, 5), "a").unwrap();
    /// map.put((7, 9), "b").unwrap();
    ///
    /// let hits: Vec<_> = map.overlapping_entries((0, 3)).unwrap().collect();
    /// assert_eq!(hits, [(Range::new(1, 5), "a")]);
    /// ```
    pub fn overlapping_entries<R>(&self, range: R) -> Result<OverlappingEntries<'_, K, V, C>, Error>
    where
        R: Into<Range<K>>,
        K: Clone,
        V: Clone,
    {
        self.query(range.into(), |entry: &Entry<K, V>| (entry.range.clone(), entry.value.clone()))
    }

    /// Returns how many entries overlap `range`, without scanning them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrder`] if `range.from` sorts after `range.to`.
    ///
    /// # Complexity
    ///
    /// O(log n), unless a sort is pending or `range` is empty (`from == to`),
    /// in which case the empty ranges stored at that key are counted too.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::RangeMap;
    ///
    /// let map = RangeMap::new();
    /// for i in 0..100 {
    ///     map.put((i, i + 10), i).unwrap();
    /// }
    /// assert_eq!(map.count_overlapping((50, 51)).unwrap(), 10);
    /// ```
    pub fn count_overlapping<R>(&self, range: R) -> Result<usize, Error>
    where
        R: Into<Range<K>>,
    {
        let query = self.in_order(range.into())?;
        let raw = self.sorted();
        Ok(raw.plan(&query, &self.compare).remaining())
    }

    fn query<T>(&self, range: Range<K>, project: fn(&Entry<K, V>) -> T) -> Result<Overlapping<'_, K, V, C, T>, Error> {
        let query = self.in_order(range)?;
        let raw = self.sorted();
        let scan = raw.plan(&query, &self.compare);
        Ok(Overlapping {
            raw,
            compare: &self.compare,
            query,
            scan,
            project,
        })
    }

    fn in_order(&self, range: Range<K>) -> Result<Range<K>, Error> {
        if range.is_in_order_by(&self.compare) {
            Ok(range)
        } else {
            log::debug!("rejected out-of-order range");
            Err(Error::OutOfOrder)
        }
    }

    /// Read access to the raw map with both indexes sorted.
    fn sorted(&self) -> RwLockReadGuard<'_, RawRangeMap<K, V>> {
        let raw = self.raw.read();
        if raw.is_sorted() {
            return raw;
        }
        drop(raw);

        let mut raw = self.raw.write();
        raw.ensure_sorted(&self.compare);
        RwLockWriteGuard::downgrade(raw)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RangeMap<K, V, C> {
    fn clone(&self) -> Self {
        RangeMap {
            raw: RwLock::new((*self.raw.read()).clone()),
            compare: self.compare.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RangeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw.read();
        f.debug_map().entries(raw.entries().map(|entry| (&entry.range, &entry.value))).finish()
    }
}

impl<K: Ord, V> Default for RangeMap<K, V> {
    fn default() -> Self {
        RangeMap::new()
    }
}

impl<K, V, C, T> Iterator for Overlapping<'_, K, V, C, T>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let entry = self.raw.next_hit(&mut self.scan, &self.query, self.compare)?;
        Some((self.project)(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.scan.remaining();
        (remaining, Some(remaining))
    }
}

impl<K, V, C, T> ExactSizeIterator for Overlapping<'_, K, V, C, T>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn len(&self) -> usize {
        self.scan.remaining()
    }
}

impl<K, V, C, T> FusedIterator for Overlapping<'_, K, V, C, T> where C: Fn(&K, &K) -> Ordering {}

impl<K: fmt::Debug, V, C, T> fmt::Debug for Overlapping<'_, K, V, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlapping")
            .field("query", &self.query)
            .field("remaining", &self.scan.remaining())
            .finish_non_exhaustive()
    }
}
