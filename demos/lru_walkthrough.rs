//! LRU Cache Walkthrough
//!
//! Steps through the basic operations and prints the recency order and the
//! metrics after each one.
//!
//! Run with: cargo run --example lru_walkthrough

extern crate lru_arena;

use lru_arena::config::LruCacheConfig;
use lru_arena::metrics::CacheMetrics;
use lru_arena::LruCache;
use std::error::Error;

fn order(cache: &LruCache<u32, &'static str>) -> String {
    let keys: Vec<String> = cache.iter().map(|(k, _)| k.to_string()).collect();
    format!("[{}]", keys.join(", "))
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("LRU Cache Walkthrough");
    println!("=====================\n");

    let config = LruCacheConfig::try_new(3)?;
    let mut cache = LruCache::init(config, None);

    cache.put(1, "one");
    cache.put(2, "two");
    cache.put(3, "three");
    println!("after 3 puts (MRU first): {}", order(&cache));

    cache.get(&1);
    println!("after get(1):             {}", order(&cache));

    if let Some((key, value)) = cache.put(4, "four") {
        println!("put(4) evicted ({key}, {value:?})");
    }
    println!("after put(4):             {}", order(&cache));

    if let Some((key, old)) = cache.put(3, "THREE") {
        println!("put(3) replaced ({key}, {old:?})");
    }
    println!("after update of 3:        {}", order(&cache));

    println!("peek(4) = {:?}, order unchanged: {}", cache.peek(&4), order(&cache));
    println!("next eviction would drop: {:?}\n", cache.peek_lru());

    println!("Zero capacity");
    println!("-------------");
    let mut empty = LruCache::new(0);
    println!("put(1) returned {:?}", empty.put(1, "one"));
    let hit = empty.get(&1).copied();
    println!("get(1) = {:?}, len = {}\n", hit, empty.len());

    println!("Invalid capacity");
    println!("----------------");
    match LruCache::<u32, u32>::try_new(-5) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("error: {e}"),
    }
    println!();

    println!("Metrics ({})", cache.algorithm_name());
    println!("-------------");
    for (name, value) in cache.metrics() {
        println!("  {name:<14} {value:.2}");
    }

    cache.check_invariants()?;
    Ok(())
}
