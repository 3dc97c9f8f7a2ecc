//! A concurrent interval-overlap index for Rust.
//!
//! This crate provides [`RangeMap`], a non-unique mapping from ranges to
//! values that answers "which values have a range overlapping this one?".
//!
//! - [`put`](RangeMap::put) - Append a value under a range (amortized O(1))
//! - [`overlapping`](RangeMap::overlapping) - Lazily iterate the values overlapping a query range
//! - [`count_overlapping`](RangeMap::count_overlapping) - Count them in O(log n) without scanning
//!
//! # Example
//!
//! ```
//! use overlap_map::RangeMap;
//!
//! let bookings = RangeMap::new();
//! bookings.put((9, 11), "standup").unwrap();
//! bookings.put((10, 12), "review").unwrap();
//! bookings.put((12, 13), "lunch").unwrap();
//!
//! // Overlap is half-open: "review" ends exactly when "lunch" starts.
//! let mut clashes: Vec<_> = bookings.overlapping((11, 13)).unwrap().collect();
//! clashes.sort_unstable();
//! assert_eq!(clashes, ["lunch", "review"]);
//!
//! assert_eq!(bookings.count_overlapping((0, 24)).unwrap(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Shared across threads** - `put` and queries take `&self`, guarded by a reader-writer lock
//! - **Custom key order** - Any comparator, including ones describing wrap-around domains
//!
//! # Implementation
//!
//! Entries are stored once, in insertion order, and indexed by two lists of
//! entry ids: one sorted by range start, one by range end. Inserts only append
//! and mark the lists dirty; the next query re-sorts them. A query locates its
//! boundaries in both lists by binary search, which yields the exact number of
//! overlapping entries and two candidate windows, and then scans whichever
//! window is shorter.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod range;
mod raw;

pub mod range_map;

pub use error::Error;
pub use range::Range;
pub use range_map::RangeMap;
