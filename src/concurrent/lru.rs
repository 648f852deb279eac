//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache: one [`LruSegment`] behind one
//! `parking_lot::Mutex`. This is the multi-threaded counterpart to
//! [`LruCache`](crate::LruCache) and has exactly the same eviction order.
//!
//! # When to Use
//!
//! **Use ConcurrentLruCache when:**
//! - Several threads share one cache
//! - Eviction must follow the global recency order
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `LruCache`, which takes no lock
//!
//! # Example
//!
//! ```rust
//! use lru_arena::concurrent::ConcurrentLruCache;
//! use lru_arena::config::LruCacheConfig;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<ConcurrentLruCache<String, usize>> =
//!     Arc::new(ConcurrentLruCache::init(LruCacheConfig { capacity: 10_000 }, None));
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for j in 0..1000 {
//!             cache.put(format!("key-{}-{}", i, j), j);
//!         }
//!     })
//! }).collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 4000);
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::{CacheError, InvariantError};
use crate::lru::LruSegment;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache.
///
/// All operations, including `get`, lock the whole cache for their duration.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone + Send`.
/// - `V`: Value type. Must implement `Send`; `get` additionally needs `Clone`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use lru_arena::concurrent::ConcurrentLruCache;
/// use std::sync::Arc;
///
/// let cache = Arc::new(ConcurrentLruCache::new(1000));
///
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get("key"), Some(42));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, S>>,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
{
    /// Creates a concurrent LRU cache from a configuration with an optional
    /// hasher. If `hasher` is `None`, uses `DefaultHashBuilder`.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a concurrent cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a concurrent cache from a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is negative.
    pub fn try_new(capacity: i64) -> Result<Self, CacheError> {
        Ok(Self::init(LruCacheConfig::try_new(capacity)?, None))
    }
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    S: BuildHasher + Send,
{
    /// Creates a concurrent LRU cache with a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(LruSegment::init(config, hash_builder)),
        }
    }

    /// The capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.segment.lock().cap()
    }

    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Retrieves a clone of the value and marks the key most recently used.
    ///
    /// For operations that don't need ownership, use
    /// [`get_with()`](Self::get_with) instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Applies `f` to the value while holding the lock. Marks the key most
    /// recently used.
    ///
    /// ```rust
    /// use lru_arena::concurrent::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4);
    /// cache.put("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |v| v.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value while holding the lock.
    ///
    /// ```rust
    /// use lru_arena::concurrent::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4);
    /// cache.put("counter", 1);
    /// cache.get_mut_with(&"counter", |v| *v += 1);
    /// assert_eq!(cache.get(&"counter"), Some(2));
    /// ```
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.segment.lock().get_mut(key).map(f)
    }

    /// Applies `f` to the value without touching its recency.
    pub fn peek_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().peek(key).map(f)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains(key)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Returns the replaced pair on update, the evicted LRU pair when the
    /// insert exceeded the capacity, or `None`.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.segment.lock().put(key, value)
    }

    /// Removes a key from the cache and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.segment.lock().pop_lru()
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }

    /// Snapshot of the keys in MRU→LRU order.
    pub fn keys(&self) -> Vec<K> {
        self.segment.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.lock().check_invariants()
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    S: BuildHasher + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("segment", &*self.segment.lock())
            .finish()
    }
}
