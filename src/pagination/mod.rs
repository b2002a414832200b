//! Pagination module
//!
//! Turns filter-reduced store pages into fixed-size client pages.
//!
//! # Overview
//!
//! The store applies its page limit to key-condition matches and filters
//! afterwards, so one store page may hold anywhere from zero to `limit`
//! useful records. [`PageAccumulator`] keeps fetching until the caller's
//! budget is met or the partition runs out, and hands back the records plus
//! a fresh [`Cursor`] positioned right after the last record returned.

mod accumulator;
mod pager;
mod types;

pub use accumulator::PageAccumulator;
pub use pager::Pager;
pub use types::Cursor;
