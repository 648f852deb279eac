#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     LruCache<K, V, S>                        │
//! │                                                              │
//! │   key index: HashMap<K, NodeIndex, S>                        │
//! │        │                                                     │
//! │        ▼                                                     │
//! │   recency list (slot arena)                                  │
//! │   ┌──────┐   ┌──────┐   ┌──────┐   ┌──────┐   ┌──────┐       │
//! │   │ HEAD │◀─▶│ MRU  │◀─▶│ ...  │◀─▶│ LRU  │◀─▶│ TAIL │       │
//! │   └──────┘   └──────┘   └──────┘   └──────┘   └──────┘       │
//! │   slot 0                                      slot 1         │
//! │                                                              │
//! │   free list: slots of unlinked nodes, reused on insert       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `get_mut` / `peek` | O(1) expected |
//! | `put` | O(1) expected, at most one eviction |
//! | `remove` / `pop_lru` | O(1) expected |
//! | `iter` | O(n) |
//!
//! ## Configuration
//!
//! ```rust
//! use lru_arena::LruCache;
//! use lru_arena::config::LruCacheConfig;
//!
//! let config = LruCacheConfig { capacity: 2 };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! Capacities arriving as signed integers go through `try_new`, which rejects
//! negative values:
//!
//! ```rust
//! use lru_arena::{CacheError, LruCache};
//!
//! let err = LruCache::<u64, u64>::try_new(-1).unwrap_err();
//! assert_eq!(err, CacheError::InvalidCapacity { requested: -1 });
//! ```
//!
//! ## Concurrent Cache
//!
//! Enable the `concurrent` feature for a thread-safe version:
//!
//! ```toml
//! [dependencies]
//! lru-arena = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use lru_arena::ConcurrentLruCache;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(10_000));
//!
//! // Safe to share across threads
//! let cache_clone = Arc::clone(&cache);
//! std::thread::spawn(move || {
//!     cache_clone.put("key".to_string(), 42);
//! });
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the cache and its iterator
//! - [`config`]: configuration structures
//! - [`error`]: construction and invariant-check errors
//! - [`metrics`]: counters for cache activity
//! - `concurrent`: thread-safe wrapper (requires `concurrent` feature)

#![no_std]

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Arena-backed doubly linked list with head and tail sentinels.
///
/// Internal infrastructure for the recency order. Nodes are addressed by
/// slot index; freed slots go on a free list and are reused.
pub(crate) mod list;

/// Error types.
pub mod error;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// an insert exceeds the capacity.
pub mod lru;

/// Cache metrics system.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe LRU cache guarded by a single lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{CacheError, InvariantError};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
