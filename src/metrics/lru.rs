//! LRU Cache Metrics

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU metrics: the core counters plus the live entry count.
#[derive(Debug, Clone, Default)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,
    /// Live entries at the time of the last mutation.
    pub len: u64,
    /// Configured capacity.
    pub capacity: u64,
}

impl LruCacheMetrics {
    pub fn new(capacity: usize) -> Self {
        Self {
            core: CoreCacheMetrics::new(),
            len: 0,
            capacity: capacity as u64,
        }
    }

    /// Fill level in `[0.0, 1.0]`; 0.0 for a capacity-zero cache.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("utilization".to_string(), self.utilization());
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
