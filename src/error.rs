//! Errors returned by fallible [`Tree`](crate::Tree) queries.
//!
//! Absent values are not errors: lookups return `Option` and
//! [`Tree::remove`](crate::Tree::remove) signals a missing value with `None`.
//! Only queries with a contract the caller can actually violate, like asking
//! for an out-of-range in-order rank, return a `TreeError`.

use thiserror::Error;

/// The error type for fallible [`Tree`](crate::Tree) queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// An order-statistic query asked for a rank outside `[0, len)`.
    #[error("rank {index} is out of bounds for a tree of length {len}")]
    IndexOutOfBounds {
        /// The requested in-order rank.
        index: usize,
        /// The number of values stored when the query was made.
        len: usize,
    },
}
