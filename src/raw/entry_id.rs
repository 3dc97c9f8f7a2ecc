use core::num::NonZero;

#[cfg(test)]
type RawId = u16;
#[cfg(not(test))]
type RawId = u32;

/// Position of an entry in the [`Arena`](super::arena::Arena).
///
/// Both sort indexes store these instead of the entries themselves, so each
/// `(range, value)` pair is kept exactly once.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct EntryId(NonZero<RawId>);

impl EntryId {
    pub(crate) const MAX: usize = (RawId::MAX - 1) as usize;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`EntryId::new()` - `index` > `EntryId::MAX`!");
        match NonZero::new((index + 1) as RawId) {
            Some(id) => Self(id),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
