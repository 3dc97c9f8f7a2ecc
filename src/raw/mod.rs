mod arena;
mod entry_id;
mod raw_range_map;

pub(crate) use raw_range_map::{Entry, RawRangeMap, Scan};
