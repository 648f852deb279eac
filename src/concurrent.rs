//! Concurrent Cache Implementations
//!
//! Thread-safe wrappers around the single-threaded caches, available with the
//! `concurrent` feature.
//!
//! # Why one Mutex?
//!
//! An LRU `get` is a write: it moves the entry to the MRU end of the recency
//! list. The key index and the recency list must also change together; a
//! reader that saw the index mid-update could follow a handle to a node that
//! was just unlinked. So every operation takes one `parking_lot::Mutex`
//! covering both structures. An `RwLock` would buy nothing because there are
//! no read-only hot paths.
//!
//! Sharding the key space over several locks would raise throughput but turn
//! the global recency order into a per-shard one, so eviction would no longer
//! always drop the globally least recently used entry. This crate keeps the
//! global order.
//!
//! # Available Concurrent Caches
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConcurrentLruCache`] | Thread-safe LRU cache behind a single lock |
//!
//! # Example
//!
//! ```rust
//! use lru_arena::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get` clones the value so the lock can be released. Use `get_with()` to
//! work on the value while the lock is held instead:
//!
//! ```rust,ignore
//! let len = cache.get_with(&key, |value| value.len());
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
