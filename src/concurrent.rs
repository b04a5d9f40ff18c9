//! Mutex decorator that makes any [`CoreCache`] shareable between threads.
//!
//! ## Architecture
//!
//! ```text
//!   Arc<Concurrent<C, K, V>>  ──►  parking_lot::Mutex<C>  ──►  C: CoreCache<K, V>
//!        │                              │
//!        │ &self methods                │ one holder at a time; every call
//!        │ (add, get, pop, ...)         │ takes the lock, forwards, releases
//!        ▼                              ▼
//!   thread 1, thread 2, ...         FifoCache / LruCache / MruCache / Cache
//! ```
//!
//! A single exclusive lock rather than a reader-writer lock: `get` reorders
//! entries for LRU and MRU, so reads mutate too.
//!
//! Values cannot be borrowed past the lock, so [`Concurrent::get`] returns a
//! clone. Use [`Concurrent::get_with`] to inspect a value in place, or
//! [`Concurrent::lock`] to run several operations atomically.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use evictkit::concurrent::Concurrent;
//! use evictkit::policy::lru::LruCache;
//!
//! let cache = Arc::new(Concurrent::new(LruCache::<u64, u64>::new(100)));
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..10 {
//!                 cache.add(t * 10 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 40);
//! assert_eq!(cache.get(&31), Some(1));
//! ```

use std::fmt;
use std::marker::PhantomData;

use parking_lot::{Mutex, MutexGuard};

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::traits::{ConcurrentCache, CoreCache};

/// Serializes every operation on the wrapped cache behind one mutex.
///
/// `K` and `V` are the inner cache's key and value types; they are inferred
/// from `C` at construction.
pub struct Concurrent<C, K, V> {
    inner: Mutex<C>,
    _entries: PhantomData<fn(K, V)>,
}

impl<C, K, V> Concurrent<C, K, V>
where
    C: CoreCache<K, V>,
{
    /// Wraps `cache`. Its contents and bound carry over unchanged.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
            _entries: PhantomData,
        }
    }
}

impl<C, K, V> Concurrent<C, K, V> {
    /// Locks the cache for a sequence of operations.
    ///
    /// Other threads block until the guard is dropped.
    ///
    /// ```
    /// use evictkit::concurrent::Concurrent;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache = Concurrent::new(FifoCache::<&str, i32>::new(4));
    /// {
    ///     let mut guard = cache.lock();
    ///     if !guard.contains(&"k") {
    ///         guard.add("k", 1);
    ///     }
    /// }
    /// assert_eq!(cache.get(&"k"), Some(1));
    /// ```
    pub fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock()
    }

    /// Unwraps the cache.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C, K, V> Concurrent<C, K, V>
where
    C: CoreCache<K, V>,
{
    pub fn add(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().add(key, value)
    }

    /// Looks up `key` (promoting it per the inner policy) and clones the value.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Looks up `key` and applies `f` to the value while the lock is held.
    ///
    /// ```
    /// use evictkit::concurrent::Concurrent;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let cache = Concurrent::new(LruCache::new(4));
    /// cache.add(1, vec![1u8; 1024]);
    /// assert_eq!(cache.get_with(&1, |v| v.len()), Some(1024));
    /// ```
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Like [`get_with`](Self::get_with) without promoting the entry.
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().peek(key).map(f)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.inner.lock().max_entries()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<C, K, V> fmt::Debug for Concurrent<C, K, V>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("Concurrent").field("inner", &*cache).finish(),
            None => f
                .debug_struct("Concurrent")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

impl<C, K, V> Default for Concurrent<C, K, V>
where
    C: CoreCache<K, V> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C, K, V> From<C> for Concurrent<C, K, V>
where
    C: CoreCache<K, V>,
{
    fn from(cache: C) -> Self {
        Self::new(cache)
    }
}

impl<C, K, V> ConcurrentCache for Concurrent<C, K, V> where C: Send {}

#[cfg(feature = "metrics")]
impl<C, K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for Concurrent<C, K, V>
where
    C: MetricsSnapshotProvider<CacheMetricsSnapshot>,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::policy::fifo::FifoCache;
    use crate::policy::lru::LruCache;
    use crate::policy::mru::MruCache;

    #[test]
    fn forwards_policy_semantics() {
        let cache = Concurrent::new(LruCache::new(2));
        cache.add("a", 1);
        cache.add("b", 2);
        assert_eq!(cache.get(&"a"), Some(1));
        cache.add("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.max_entries(), 2);
    }

    #[test]
    fn mru_eviction_through_decorator() {
        let cache = Concurrent::new(MruCache::new(2));
        cache.add("a", 1);
        cache.add("b", 2);
        cache.get(&"a");
        cache.add("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.pop(), Some(("c", 3)));
    }

    #[test]
    fn peek_with_leaves_order_alone() {
        let cache = Concurrent::new(LruCache::new(2));
        cache.add(1, "one".to_string());
        cache.add(2, "two".to_string());
        assert_eq!(cache.peek_with(&1, |v| v.len()), Some(3));
        cache.add(3, "three".to_string());
        assert!(!cache.contains(&1));
        assert_eq!(cache.get_with(&99, |v| v.len()), None);
    }

    #[test]
    fn remove_clear_and_into_inner() {
        let cache = Concurrent::new(FifoCache::new(4));
        cache.add(1, 10);
        cache.add(2, 20);
        assert_eq!(cache.remove(&1), Some(10));
        assert_eq!(cache.remove(&1), None);

        cache.clear();
        assert!(cache.is_empty());
        cache.add(3, 30);

        let inner = cache.into_inner();
        assert_eq!(inner.peek(&3), Some(&30));
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn debug_reports_locked_state() {
        let cache = Concurrent::new(FifoCache::<u8, u8>::new(1));
        let guard = cache.lock();
        assert!(format!("{:?}", cache).contains("<locked>"));
        drop(guard);
        assert!(format!("{:?}", cache).contains("OrderedCache"));
    }

    #[test]
    fn is_concurrent_cache() {
        fn assert_concurrent<C: ConcurrentCache>(_: &C) {}
        assert_concurrent(&Concurrent::new(LruCache::<u64, String>::new(8)));
    }

    #[test]
    fn parallel_writers_respect_bound() {
        let cache = Arc::new(Concurrent::new(LruCache::<u64, u64>::new(64)));
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..1_000 {
                        let key = t * 1_000 + i;
                        cache.add(key, i);
                        cache.get(&key);
                        if i % 7 == 0 {
                            cache.remove(&key);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 64);
        cache.lock().check_invariants().unwrap();
    }

    #[test]
    fn parallel_pops_drain_each_entry_once() {
        let cache = Arc::new(Concurrent::new(FifoCache::<u32, u32>::new(0)));
        for i in 0..4_000 {
            cache.add(i, i);
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let mut popped = Vec::new();
                    while let Some((key, _)) = cache.pop() {
                        popped.push(key);
                    }
                    popped
                })
            })
            .collect();

        let mut all: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..4_000).collect::<Vec<_>>());
        assert!(cache.is_empty());
    }
}
