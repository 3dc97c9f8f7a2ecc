use alloc::vec::Vec;
use core::cmp::Ordering::{self, Equal, Greater, Less};

use super::arena::Arena;
use super::entry_id::EntryId;
use crate::Range;

/// A stored `(range, value)` pair.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) range: Range<K>,
    pub(crate) value: V,
}

/// The unsynchronized core backing `RangeMap`.
///
/// Entries are stored once in `entries`; `by_from` and `by_to` are two
/// permutations of the same ids, sorted by range start and range end
/// respectively whenever `sorted` is set.
#[derive(Clone)]
pub(crate) struct RawRangeMap<K, V> {
    entries: Arena<Entry<K, V>>,
    by_from: Vec<EntryId>,
    by_to: Vec<EntryId>,
    sorted: bool,
}

/// Which index a [`Scan`] walks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    /// Ascending through `by_to`, starting at the first entry ending at or after the query start.
    Forward,
    /// Descending through `by_from`, starting at the last entry starting at or before the query end.
    Backward,
}

/// The state of one overlap query.
///
/// `hits` is the exact number of entries still to be yielded. All of them
/// lie between `cursor` and the far end of the index in `direction`.
#[derive(Clone, Debug)]
pub(crate) struct Scan {
    direction: Direction,
    cursor: usize,
    hits: usize,
}

impl Scan {
    pub(crate) const fn remaining(&self) -> usize {
        self.hits
    }
}

impl<K, V> RawRangeMap<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Arena::new(),
            by_from: Vec::new(),
            by_to: Vec::new(),
            sorted: true,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arena::with_capacity(capacity),
            by_from: Vec::with_capacity(capacity),
            by_to: Vec::with_capacity(capacity),
            sorted: true,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) const fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Entries in insertion order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.entries.iter()
    }

    /// Appends an entry to both indexes. The caller checks that `range` is in order.
    pub(crate) fn push(&mut self, range: Range<K>, value: V) {
        let id = self.entries.push(Entry { range, value });
        self.by_from.push(id);
        self.by_to.push(id);
        self.sorted = false;
    }

    /// Restores the sort order of both indexes.
    ///
    /// The indexes only ever grow at the tail, so the stable sort mostly
    /// merges a sorted prefix with the entries pushed since the last query.
    pub(crate) fn ensure_sorted<C>(&mut self, cmp: &C)
    where
        C: Fn(&K, &K) -> Ordering,
    {
        if self.sorted {
            return;
        }

        log::trace!("sorting {} range entries", self.entries.len());

        let Self {
            entries,
            by_from,
            by_to,
            sorted,
        } = self;
        by_from.sort_by(|a, b| cmp(&entries.get(*a).range.from, &entries.get(*b).range.from));
        by_to.sort_by(|a, b| cmp(&entries.get(*a).range.to, &entries.get(*b).range.to));
        *sorted = true;
    }

    /// Locates the candidate window for `query` and counts its hits.
    ///
    /// Both indexes must be sorted and `query` must be in order.
    pub(crate) fn plan<C>(&self, query: &Range<K>, cmp: &C) -> Scan
    where
        C: Fn(&K, &K) -> Ordering,
    {
        debug_assert!(self.sorted, "`RawRangeMap::plan()` - indexes are not sorted!");

        let from_of = |id: &EntryId| &self.entries.get(*id).range.from;
        let to_of = |id: &EntryId| &self.entries.get(*id).range.to;

        let starts_before_end = self.by_from.partition_point(|id| cmp(from_of(id), &query.to) == Less);
        let starts_by_end = self.by_from.partition_point(|id| cmp(from_of(id), &query.to) != Greater);
        let ends_before_start = self.by_to.partition_point(|id| cmp(to_of(id), &query.from) == Less);
        let ends_by_start = self.by_to.partition_point(|id| cmp(to_of(id), &query.from) != Greater);

        // An entry overlaps when it starts before the query ends and ends after
        // it starts, or when it equals the query. Entries failing both halves of
        // the first test are empty ranges sitting exactly on an empty query, so
        // they are subtracted twice by the inclusion-exclusion and then matched
        // by equality: both reasons to add them back.
        let empties = self.empty_matches(query, cmp, starts_before_end..starts_by_end);
        let hits = (starts_before_end + 2 * empties).saturating_sub(ends_by_start);
        debug_assert!(starts_before_end + 2 * empties >= ends_by_start);

        let forward_window = self.len() - ends_before_start;
        if forward_window < starts_by_end {
            Scan {
                direction: Direction::Forward,
                cursor: ends_before_start,
                hits,
            }
        } else {
            Scan {
                direction: Direction::Backward,
                cursor: starts_by_end,
                hits,
            }
        }
    }

    /// Counts stored empty ranges equal to an empty `query`.
    ///
    /// `starting_at_end` is the `by_from` slice of entries whose start equals `query.to`.
    fn empty_matches<C>(&self, query: &Range<K>, cmp: &C, starting_at_end: core::ops::Range<usize>) -> usize
    where
        C: Fn(&K, &K) -> Ordering,
    {
        if cmp(&query.from, &query.to) != Equal {
            return 0;
        }
        self.by_from[starting_at_end]
            .iter()
            .filter(|id| cmp(&self.entries.get(**id).range.to, &query.to) == Equal)
            .count()
    }

    /// Advances `scan` to the next entry overlapping `query`.
    pub(crate) fn next_hit<C>(&self, scan: &mut Scan, query: &Range<K>, cmp: &C) -> Option<&Entry<K, V>>
    where
        C: Fn(&K, &K) -> Ordering,
    {
        while scan.hits > 0 {
            let Some(id) = self.step(scan) else {
                debug_assert_eq!(scan.hits, 0, "`RawRangeMap::next_hit()` - window exhausted early!");
                scan.hits = 0;
                break;
            };
            let entry = self.entries.get(id);
            if entry.range.is_overlapping_by(query, cmp) {
                scan.hits -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn step(&self, scan: &mut Scan) -> Option<EntryId> {
        match scan.direction {
            Direction::Forward => {
                let id = self.by_to.get(scan.cursor).copied()?;
                scan.cursor += 1;
                Some(id)
            }
            Direction::Backward => {
                scan.cursor = scan.cursor.checked_sub(1)?;
                self.by_from.get(scan.cursor).copied()
            }
        }
    }
}
