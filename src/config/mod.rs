//! Cache Configuration Module
//!
//! Configuration structs have public fields for simple instantiation and are
//! consumed by the cache's `init` constructor:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Fixed**: The configuration is read once at construction; there is no
//!   resize primitive
//! - **Validated where it matters**: signed inputs go through `try_new`
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//!
//! With the `concurrent` feature, `ConcurrentLruCache::init` takes the same
//! `LruCacheConfig`.
//!
//! # Examples
//!
//! ```
//! use lru_arena::config::LruCacheConfig;
//! use lru_arena::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! ```

pub mod lru;

pub use lru::LruCacheConfig;
