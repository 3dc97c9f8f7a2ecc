use thiserror::Error;

/// Errors returned by [`RangeMap`](crate::RangeMap).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// A range whose `from` sorts after its `to` was passed where an
    /// in-order range is required.
    #[error("range is out of order: `from` > `to`")]
    OutOfOrder,
}
