use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::ops;

/// An ordered `(from, to)` pair of keys.
///
/// A `Range` does not require `from <= to` on its own; whether it is in
/// order depends on the key order it is judged against. [`RangeMap`] only
/// stores and queries ranges that are in order under its comparator, so a
/// caller can model wrap-around domains by supplying a comparator for them.
///
/// Every predicate comes in two forms: the plain one uses [`Ord`], the
/// `_by` one takes a comparator with the signature of [`Ord::cmp`].
///
/// [`RangeMap`]: crate::RangeMap
///
/// # Examples
///
/// ```
/// use overlap_map::Range;
///
/// let a = Range::new(1, 5);
/// let b = Range::from(4..10);
/// let c = Range::from((5, 8));
///
/// assert!(a.is_overlapping(&b));
/// assert!(!a.is_overlapping(&c)); // touching at 5 is not overlapping
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Range<K> {
    /// The start of the range.
    pub from: K,
    /// The end of the range.
    pub to: K,
}

impl<K> Range<K> {
    /// Creates a range from `from` to `to`.
    #[must_use]
    pub const fn new(from: K, to: K) -> Self {
        Self { from, to }
    }

    /// Consumes the range, returning `(from, to)`.
    #[must_use]
    pub fn into_inner(self) -> (K, K) {
        (self.from, self.to)
    }

    /// Returns `true` if `from <= to` under `cmp`.
    pub fn is_in_order_by<F>(&self, cmp: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        cmp(&self.from, &self.to) != Greater
    }

    /// Returns `true` if `from < key < to` under `cmp`.
    pub fn strictly_contains_by<F>(&self, key: &K, cmp: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        cmp(&self.from, key) == Less && cmp(key, &self.to) == Less
    }

    /// Returns `true` if `from <= key < to` under `cmp`.
    pub fn contains_by<F>(&self, key: &K, cmp: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        cmp(&self.from, key) != Greater && cmp(key, &self.to) == Less
    }

    /// Returns `true` if both boundaries compare equal under `cmp`.
    pub fn eq_by<F>(&self, other: &Self, cmp: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        cmp(&self.from, &other.from) == Equal && cmp(&self.to, &other.to) == Equal
    }

    /// Returns `true` if the ranges overlap under `cmp`.
    ///
    /// Two ranges overlap when they are equal, or when a boundary of either
    /// one lies strictly inside the other. Touching at a single boundary is
    /// not an overlap. The relation is symmetric.
    pub fn is_overlapping_by<F>(&self, other: &Self, cmp: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        self.eq_by(other, &cmp)
            || self.strictly_contains_by(&other.from, &cmp)
            || self.strictly_contains_by(&other.to, &cmp)
            || other.strictly_contains_by(&self.from, &cmp)
            || other.strictly_contains_by(&self.to, &cmp)
    }
}

impl<K: Ord> Range<K> {
    /// Returns `true` if `from <= to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::Range;
    ///
    /// assert!(Range::new(3, 3).is_in_order());
    /// assert!(!Range::new(4, 3).is_in_order());
    /// ```
    #[must_use]
    pub fn is_in_order(&self) -> bool {
        self.is_in_order_by(K::cmp)
    }

    /// Returns `true` if `from < key < to`.
    #[must_use]
    pub fn strictly_contains(&self, key: &K) -> bool {
        self.strictly_contains_by(key, K::cmp)
    }

    /// Returns `true` if `from <= key < to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlap_map::Range;
    ///
    /// let range = Range::new(1, 4);
    /// assert!(range.contains(&1));
    /// assert!(!range.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.contains_by(key, K::cmp)
    }

    /// Returns `true` if the ranges overlap.
    ///
    /// See [`is_overlapping_by`](Range::is_overlapping_by).
    #[must_use]
    pub fn is_overlapping(&self, other: &Self) -> bool {
        self.is_overlapping_by(other, K::cmp)
    }
}

impl<K> From<(K, K)> for Range<K> {
    fn from((from, to): (K, K)) -> Self {
        Self::new(from, to)
    }
}

impl<K> From<ops::Range<K>> for Range<K> {
    fn from(range: ops::Range<K>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = Range::new(4, 10);
        let b = Range::new(10, 20);
        assert!(!a.is_overlapping(&b));
        assert!(!b.is_overlapping(&a));
    }

    #[test]
    fn equal_ranges_overlap() {
        assert!(Range::new(3, 7).is_overlapping(&Range::new(3, 7)));
        // Empty ranges only overlap their equals.
        assert!(Range::new(5, 5).is_overlapping(&Range::new(5, 5)));
        assert!(!Range::new(5, 5).is_overlapping(&Range::new(5, 9)));
        assert!(Range::new(5, 5).is_overlapping(&Range::new(4, 9)));
    }

    #[test]
    fn shared_start_overlaps() {
        assert!(Range::new(1, 5).is_overlapping(&Range::new(1, 3)));
        assert!(Range::new(1, 3).is_overlapping(&Range::new(1, 5)));
    }

    #[test]
    fn containment() {
        let range = Range::new(2, 6);
        assert!(!range.strictly_contains(&2));
        assert!(range.strictly_contains(&3));
        assert!(!range.strictly_contains(&6));
        assert!(range.contains(&2));
        assert!(!range.contains(&6));
    }

    #[test]
    fn reversed_comparator() {
        let rev = |a: &i32, b: &i32| b.cmp(a);
        let range = Range::new(9, 3);
        assert!(!range.is_in_order());
        assert!(range.is_in_order_by(rev));
        assert!(range.strictly_contains_by(&5, rev));
        assert!(range.is_overlapping_by(&Range::new(4, 0), rev));
    }

    #[test]
    fn conversions() {
        assert_eq!(Range::from((1, 2)), Range::new(1, 2));
        assert_eq!(Range::from(1..2), Range::new(1, 2));
        assert_eq!(Range::new('a', 'z').into_inner(), ('a', 'z'));
    }

    fn ordered() -> impl Strategy<Value = Range<i8>> {
        (any::<i8>(), any::<i8>()).prop_map(|(a, b)| Range::new(a.min(b), a.max(b)))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in ordered(), b in ordered()) {
            prop_assert_eq!(a.is_overlapping(&b), b.is_overlapping(&a));
        }

        #[test]
        fn overlap_is_half_open_intersection(a in ordered(), b in ordered()) {
            let intersect = a.from < b.to && b.from < a.to;
            prop_assert_eq!(a.is_overlapping(&b), intersect || a == b);
        }
    }
}
