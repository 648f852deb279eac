//! Configuration for the Least Recently Used (LRU) cache.
//!
//! The only knob is `capacity`, the maximum number of live entries. It is
//! fixed for the lifetime of the cache.
//!
//! - `capacity > 0`: the cache holds up to `capacity` entries and evicts the
//!   least recently used one when a new key would exceed it.
//! - `capacity == 0`: valid, but nothing is ever retained. Every `put` of a
//!   new key is evicted again before it returns.
//!
//! Capacities often arrive as signed integers from callers or configuration
//! files. [`LruCacheConfig::try_new`] (and the `TryFrom<i64>` impl) reject
//! negative values with [`CacheError::InvalidCapacity`].
//!
//! # Examples
//!
//! ```
//! use lru_arena::config::LruCacheConfig;
//! use lru_arena::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//!
//! assert!(LruCacheConfig::try_new(-3).is_err());
//! ```

use crate::error::CacheError;
use core::fmt;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Examples
///
/// ```
/// use lru_arena::config::LruCacheConfig;
/// use lru_arena::LruCache;
///
/// let config = LruCacheConfig::try_new(2).unwrap();
/// let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
/// cache.put("a", 1);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold. Zero is allowed.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a configuration for a cache holding at most `capacity` entries.
    pub const fn new(capacity: usize) -> Self {
        LruCacheConfig { capacity }
    }

    /// Validates a signed capacity.
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is negative or
    /// larger than `usize::MAX`.
    pub fn try_new(capacity: i64) -> Result<Self, CacheError> {
        let capacity = usize::try_from(capacity).map_err(|_| CacheError::InvalidCapacity {
            requested: capacity,
        })?;
        Ok(Self::new(capacity))
    }
}

impl TryFrom<i64> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        Self::try_new(capacity)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
