//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity key-value cache with O(1) expected `get` and `put` that
//! evicts the least recently used entry once the capacity is exceeded.
//!
//! # Algorithm
//!
//! Two structures are kept in lockstep:
//!
//! - the **recency list** ([`List`]): every live entry, ordered from most to
//!   least recently used, between a head and a tail sentinel;
//! - the **key index**: a hash map from key to the [`NodeIndex`] of the list
//!   node holding that key.
//!
//! ```text
//!   key index                 recency list
//!   ┌────┬──────┐
//!   │ k3 │  ●───┼──┐   HEAD <-> [k3,v3] <-> [k1,v1] <-> [k2,v2] <-> TAIL
//!   │ k1 │  ●───┼──┼──────────────────────┘              │
//!   │ k2 │  ●───┼──┼─────────────────────────────────────┘
//!   └────┴──────┘  └──────────┘
//! ```
//!
//! A `get` or `put` of a present key looks the node up in the index and moves
//! it to the MRU end. A `put` of a new key links a fresh node at the MRU end,
//! indexes it, and if the cache now holds more than `capacity` entries pops
//! the node next to the tail sentinel and drops its key from the index.
//! Because the list is a strict total order there are never ties.
//!
//! The index stores slot indices rather than references, so both structures
//! can point at the same node without shared mutable borrows.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove / Pop: O(1) expected
//! - Iteration: O(n)
//! - Space: O(capacity); freed slots are recycled, so a full cache that keeps
//!   evicting does not allocate
//!
//! # Thread Safety
//!
//! `LruCache` is not thread-safe. `get` reorders the list, so every operation
//! needs exclusive access. To share a cache, wrap it in one lock covering both
//! structures (e.g. `Mutex<LruCache<K, V>>`), or enable the `concurrent`
//! feature for [`ConcurrentLruCache`](crate::ConcurrentLruCache).

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::{CacheError, InvariantError};
use crate::list::{self, List, NodeIndex};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use log::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the number of slots reserved up front. Larger caches grow
/// on demand.
const MAX_PREALLOC: usize = 4096;

/// Internal LRU segment holding the key index, the recency list and the
/// counters.
///
/// Shared by `LruCache` (single-threaded) and `ConcurrentLruCache` (behind
/// one lock). Every method that changes one structure changes the other in
/// the same call, so the index never names a freed slot and every linked
/// node is indexed.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, NodeIndex, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn init(config: LruCacheConfig, hash_builder: S) -> Self {
        let prealloc = config.capacity.min(MAX_PREALLOC);
        debug!(
            "creating LRU cache: capacity={}, preallocated={}",
            config.capacity, prealloc
        );
        LruSegment {
            config,
            // One extra slot: a new node is linked before the LRU one is popped.
            list: List::with_capacity(prealloc + 1),
            map: HashMap::with_capacity_and_hasher(prealloc + 1, hash_builder),
            metrics: LruCacheMetrics::new(config.capacity),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    #[inline]
    fn sync_len(&mut self) {
        self.metrics.len = self.map.len() as u64;
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.core.record_hit();
                self.list.get(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.list.move_to_front(node);
                self.metrics.core.record_hit();
                self.list.get_mut(node).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.list.get(node).map(|(_, v)| v)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(node) = self.map.get(&key).copied() {
            self.list.move_to_front(node);
            self.metrics.core.record_update();
            return self.list.replace(node, (key, value));
        }

        let node = self.list.push_front((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();

        let evicted = if self.map.len() > self.cap() {
            self.evict()
        } else {
            None
        };
        self.sync_len();
        evicted
    }

    /// Drops the LRU entry after an insert pushed the cache over capacity.
    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.take_lru()?;
        self.metrics.core.record_eviction();
        if self.cap() == 0 {
            debug!("capacity is zero, discarding inserted entry");
        } else {
            trace!("evicted LRU entry, {} entries remain", self.map.len());
        }
        Some((key, value))
    }

    /// Unlinks the LRU node and removes its key from the index.
    fn take_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_lru()?;
        let removed = self.map.remove(&key);
        debug_assert!(removed.is_some(), "LRU node was not indexed");
        Some((key, value))
    }

    pub(crate) fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.take_lru()?;
        self.metrics.core.record_removal();
        self.sync_len();
        Some(popped)
    }

    pub(crate) fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.peek_lru().map(|(k, v)| (k, v))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        let (_, value) = self.list.remove(node)?;
        self.metrics.core.record_removal();
        self.sync_len();
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        trace!("clearing LRU cache with {} entries", self.map.len());
        self.map.clear();
        self.list.clear();
        self.sync_len();
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "key index holds {} keys but recency list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.cap() {
            return Err(InvariantError::new(format!(
                "{} live entries exceed capacity {}",
                self.list.len(),
                self.cap()
            )));
        }
        for (node, (key, _)) in self.list.iter() {
            match self.map.get(key) {
                Some(&indexed) if indexed == node => {}
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "key index maps a live key to {indexed:?}, list holds it at {node:?}"
                    )));
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "live node {node:?} is missing from the key index"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<K, V, S> fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("list", &self.list)
            .finish()
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When an insert would exceed
/// the capacity, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use lru_arena::LruCache;
///
/// let mut cache = LruCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("segment", &self.segment)
            .finish()
    }
}

impl<K: Hash + Eq, V> LruCache<K, V, DefaultHashBuilder> {
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// A capacity of zero is valid: such a cache never retains anything.
    pub fn new(capacity: usize) -> Self {
        Self::init(LruCacheConfig::new(capacity), None)
    }

    /// Creates a cache from a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is negative.
    ///
    /// ```
    /// use lru_arena::LruCache;
    ///
    /// assert!(LruCache::<i32, i32>::try_new(0).is_ok());
    /// assert!(LruCache::<i32, i32>::try_new(-1).is_err());
    /// ```
    pub fn try_new(capacity: i64) -> Result<Self, CacheError> {
        Ok(Self::init(LruCacheConfig::try_new(capacity)?, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache from a configuration and a custom hash builder.
    pub fn init_with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::init(config, hash_builder),
        }
    }

    /// Creates a cache with the given capacity and hash builder.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::init_with_hasher(LruCacheConfig::new(capacity), hash_builder)
    }

    /// The capacity fixed at construction.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Returns `None` without side effects on the ordering if the key is
    /// absent.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns the value for `key` without touching its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns true if `key` is cached. Does not touch its recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// The entry that the next eviction would drop.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.segment.peek_lru()
    }

    /// Removes and returns the least recently used entry.
    #[inline]
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.segment.pop_lru()
    }

    /// Removes `key` and returns its value.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Drops every entry. The capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Iterates entries from most to least recently used without touching
    /// their recency. Use `.rev()` for LRU→MRU order.
    ///
    /// ```
    /// use lru_arena::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c");
    /// cache.get(&1);
    ///
    /// let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.segment.iter()
    }

    /// Checks that the key index and the recency list agree and that the
    /// capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.segment.check_invariants()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Returns the pair that left the cache, if any:
    ///
    /// - the previous `(key, value)` when `key` was already present;
    /// - the evicted LRU pair when the insert exceeded the capacity (for a
    ///   capacity-zero cache that is the pair just offered);
    /// - `None` otherwise.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.segment.put(key, value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`LruCache`], MRU first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, (k, v))| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, (k, v))| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn keys<K: Hash + Eq + Copy, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(2);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3), Some(("apple", 1)));
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.put("cherry", 4), Some(("banana", 2)));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_get_miss_has_no_side_effects() {
        let mut cache = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        let before = keys(&cache);
        assert_eq!(cache.get(&99), None);
        assert_eq!(keys(&cache), before);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert!(cache.contains(&"a"));
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.peek(&"a"), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);
        let evicted = cache.put("cherry", 3);
        assert_eq!(evicted, None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_pop_and_peek_lru() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.peek_lru(), None);
        assert_eq!(cache.pop_lru(), None);

        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&1);

        assert_eq!(cache.peek_lru(), Some((&2, &"two")));
        assert_eq!(cache.pop_lru(), Some((2, "two")));
        assert_eq!(cache.pop_lru(), Some((3, "three")));
        assert_eq!(keys(&cache), [1]);
        assert!(!cache.contains(&2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.cap(), 2);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_capacity_limits() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.put("cherry", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_zero_capacity_retains_nothing() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.put(1, 1), Some((1, 1)));
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_try_new() {
        assert_eq!(
            LruCache::<u8, u8>::try_new(-7).unwrap_err(),
            CacheError::InvalidCapacity { requested: -7 }
        );
        let cache = LruCache::<u8, u8>::try_new(5).unwrap();
        assert_eq!(cache.cap(), 5);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get(&key2), Some(&2));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
        assert_eq!(cache.remove("apple"), Some(1));
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache = LruCache::new(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        let fruit1 = ComplexValue {
            val: 1,
            description: String::from("First fruit"),
        };
        let fruit2 = ComplexValue {
            val: 2,
            description: String::from("Second fruit"),
        };
        let fruit3 = ComplexValue {
            val: 3,
            description: String::from("Third fruit"),
        };
        cache.put(key1.clone(), fruit1.clone());
        cache.put(key2.clone(), fruit2.clone());
        assert_eq!(cache.get(&key1).unwrap().val, fruit1.val);
        assert_eq!(cache.get(&key2).unwrap().val, fruit2.val);
        let evicted = cache.put(String::from("cherry"), fruit3);
        let evicted_fruit = evicted.unwrap();
        assert_eq!(evicted_fruit.1, fruit1);
        assert_eq!(cache.remove(&key1), None);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &0.0);

        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        cache.get(&"banana");
        cache.get(&"durian");
        cache.peek(&"apple");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits").unwrap(), &2.0);
        assert_eq!(metrics.get("cache_misses").unwrap(), &1.0);
        assert_eq!(metrics.get("requests").unwrap(), &3.0);

        cache.put("banana", 5);
        cache.put("cherry", 3);
        cache.remove(&"cherry");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("insertions").unwrap(), &3.0);
        assert_eq!(metrics.get("updates").unwrap(), &1.0);
        assert_eq!(metrics.get("evictions").unwrap(), &1.0);
        assert_eq!(metrics.get("removals").unwrap(), &1.0);
        assert_eq!(metrics.get("len").unwrap(), &1.0);
        assert_eq!(metrics.get("utilization").unwrap(), &0.5);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_segment_directly() {
        let mut segment: LruSegment<&str, i32, DefaultHashBuilder> =
            LruSegment::init(LruCacheConfig::new(2), DefaultHashBuilder::default());
        assert_eq!(segment.len(), 0);
        assert!(segment.is_empty());
        assert_eq!(segment.cap(), 2);
        segment.put("a", 1);
        segment.put("b", 2);
        assert_eq!(segment.len(), 2);
        assert_eq!(segment.get(&"a"), Some(&1));
        assert_eq!(segment.get(&"b"), Some(&2));
        segment.check_invariants().unwrap();
    }

    #[test]
    fn test_lru_invariant_check_detects_orphaned_index_entry() {
        let mut cache = LruCache::new(3);
        cache.put(1, 1);
        cache.put(2, 2);

        // Unlink a node behind the index's back.
        let node = cache.segment.map[&1];
        cache.segment.list.remove(node);
        let err = cache.check_invariants().unwrap_err();
        assert!(err.message().contains("key index holds 2 keys"));
    }

    #[test]
    fn test_lru_iter_order() {
        let mut cache = LruCache::new(4);
        for i in 1..=4 {
            cache.put(i, i * 10);
        }
        cache.get(&2);
        assert_eq!(keys(&cache), [2, 4, 3, 1]);

        let rev: Vec<i32> = cache.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(rev, [1, 3, 4, 2]);
        assert_eq!(cache.iter().len(), 4);

        let sum: i32 = (&cache).into_iter().map(|(_, v)| *v).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_lru_concurrent_access() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(100)));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.put(key, t * 1000 + i);
                }
            }));
        }

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert!(guard.len() <= 100);
        assert!(!guard.is_empty());
        guard.check_invariants().unwrap();
    }
}
