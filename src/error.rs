//! Error types.
//!
//! - [`CacheError`]: returned by fallible constructors when the requested
//!   configuration is invalid.
//! - [`InvariantError`]: returned by `check_invariants` methods when the
//!   key index and the recency list disagree. Seeing one means the cache has
//!   a bug, not that the caller did something wrong.
//!
//! A lookup that finds nothing is not an error; `get` returns `None`.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Error returned when a cache cannot be built from the requested parameters.
///
/// # Example
///
/// ```
/// use lru_arena::{CacheError, LruCache};
///
/// let err = LruCache::<u32, u32>::try_new(-1).unwrap_err();
/// assert_eq!(err, CacheError::InvalidCapacity { requested: -1 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The capacity was negative or does not fit in `usize`.
    #[error("invalid capacity {requested}: capacity must be a non-negative integer")]
    InvalidCapacity {
        /// The value that was rejected.
        requested: i64,
    },
}

/// Error returned when an internal cache invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
