use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Plain counters owned by a single cache.
///
/// Updated through `&mut self`, so no atomics are needed; a cache shared via
/// [`Concurrent`](crate::concurrent::Concurrent) records under its lock.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,
}

impl CacheMetrics {
    /// Copies the counters alongside the cache's current shape.
    pub fn snapshot(&self, cache_len: usize, max_entries: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evicted_entries: self.evicted_entries,
            pop_calls: self.pop_calls,
            pop_found: self.pop_found,
            remove_calls: self.remove_calls,
            remove_found: self.remove_found,
            clear_calls: self.clear_calls,
            cache_len,
            max_entries,
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_pop_call(&mut self) {
        self.pop_calls += 1;
    }
    fn record_pop_found(&mut self) {
        self.pop_found += 1;
    }
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }
    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}
