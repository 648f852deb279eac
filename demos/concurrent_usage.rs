//! Concurrent Cache Usage Examples
//!
//! This example demonstrates multi-threaded usage of `ConcurrentLruCache`.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

extern crate lru_arena;

use lru_arena::config::LruCacheConfig;
use lru_arena::metrics::CacheMetrics;
use lru_arena::ConcurrentLruCache;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const NUM_THREADS: usize = 8;
const OPS_PER_THREAD: usize = 10_000;

fn main() {
    println!("Concurrent LRU Cache Example");
    println!("============================\n");

    let cache: Arc<ConcurrentLruCache<String, usize>> =
        Arc::new(ConcurrentLruCache::init(LruCacheConfig { capacity: 1000 }, None));

    let start = Instant::now();
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    // Overlapping key space across threads
                    let key = format!("key_{}", (t * 31 + i) % 2000);
                    if i % 4 == 0 {
                        cache.put(key, i);
                    } else {
                        let _ = cache.get(&key);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }
    let elapsed = start.elapsed();

    let total_ops = NUM_THREADS * OPS_PER_THREAD;
    println!(
        "{} threads x {} ops in {:?} ({:.0} ops/sec)",
        NUM_THREADS,
        OPS_PER_THREAD,
        elapsed,
        total_ops as f64 / elapsed.as_secs_f64()
    );
    println!("entries: {} / {}\n", cache.len(), cache.capacity());

    // Work on a value without cloning it out of the cache
    cache.put("config".to_string(), 42);
    let doubled = cache.get_with("config", |v| v * 2);
    println!("get_with(config, x2) = {:?}", doubled);

    println!("\nMetrics ({})", cache.algorithm_name());
    for (name, value) in cache.metrics() {
        println!("  {name:<14} {value:.2}");
    }

    match cache.check_invariants() {
        Ok(()) => println!("\ninvariants hold"),
        Err(e) => eprintln!("\ninvariant violated: {e}"),
    }
}
