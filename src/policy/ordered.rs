//! Generic cache over [`OrderedStore`], parameterized by an eviction policy.
//!
//! FIFO, LRU and MRU differ in exactly two decisions, so they share one
//! implementation and plug in as zero-sized [`EvictionPolicy`] markers:
//!
//! | Policy | `PROMOTE_ON_ACCESS` | `EVICT_FROM`   |
//! |--------|---------------------|----------------|
//! | FIFO   | `false`             | `End::Back`    |
//! | LRU    | `true`              | `End::Back`    |
//! | MRU    | `true`              | `End::Front`   |
//!
//! ## Insert Flow
//!
//! ```text
//!   add(key, value):
//!     key present?  ── yes ──► promote if PROMOTE_ON_ACCESS
//!          │                   replace value in place, return Some(old)
//!          no
//!          ▼
//!     bounded and len == max_entries? ── yes ──► pop one from EVICT_FROM
//!          │                                         │
//!          ▼◄────────────────────────────────────────┘
//!     link (key, value) at the front, return None
//! ```
//!
//! The victim is chosen before the new entry is linked. For FIFO and LRU that
//! is the same entry an insert-then-pop would remove; for MRU it keeps the
//! incoming key from evicting itself.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::error::InvariantError;
use crate::store::{End, Iter, OrderedStore};
use crate::traits::CoreCache;

/// The two decisions that distinguish one ordering policy from another.
pub trait EvictionPolicy {
    /// Short name used in log events.
    const NAME: &'static str;
    /// Whether a hit (`get`, or `add` of an existing key) moves the entry to
    /// the front.
    const PROMOTE_ON_ACCESS: bool;
    /// The end `pop` and bound enforcement remove from.
    const EVICT_FROM: End;
}

/// Key-value cache with policy-defined promotion and eviction.
///
/// Use the aliases [`FifoCache`](crate::policy::fifo::FifoCache),
/// [`LruCache`](crate::policy::lru::LruCache) and
/// [`MruCache`](crate::policy::mru::MruCache) rather than naming this type.
///
/// `max_entries == 0` means unbounded.
///
/// # Thread Safety
///
/// Not synchronized. Wrap in [`Concurrent`](crate::concurrent::Concurrent)
/// for shared access.
pub struct OrderedCache<K, V, P> {
    store: OrderedStore<K, V>,
    max_entries: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
    _policy: PhantomData<fn() -> P>,
}

impl<K, V, P> OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    /// Creates a cache holding at most `max_entries` entries (`0` = unbounded).
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.max_entries(), 100);
    /// assert!(cache.is_empty());
    /// ```
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        Self::from_store(OrderedStore::new(), max_entries)
    }

    /// Creates an unbounded cache.
    #[inline]
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Creates a bounded cache with its index and list allocated up front.
    ///
    /// For an unbounded cache this is the same as [`new`](Self::new).
    pub fn preallocated(max_entries: usize) -> Self {
        Self::from_store(OrderedStore::with_capacity(max_entries), max_entries)
    }

    fn from_store(store: OrderedStore<K, V>, max_entries: usize) -> Self {
        Self {
            store,
            max_entries,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
            _policy: PhantomData,
        }
    }

    /// Inserts or updates an entry; see [`CoreCache::add`].
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(2);
    /// cache.add("a", 1);
    /// cache.add("b", 2);
    /// cache.get(&"a"); // FIFO ignores reads
    /// cache.add("c", 3);
    /// assert!(!cache.contains(&"a"));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.store.slot(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            if P::PROMOTE_ON_ACCESS {
                self.store.move_to_front(id);
            }
            return self.store.replace(id, value);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.is_full() {
            self.evict();
        }
        self.store.push_front(key, value);
        debug_assert!(self.max_entries == 0 || self.store.len() <= self.max_entries);
        None
    }

    /// Looks up `key`, promoting it when the policy does.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.store.slot(key) {
            Some(id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                id
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };
        if P::PROMOTE_ON_ACCESS {
            self.store.move_to_front(id);
        }
        self.store.value(id)
    }

    /// Like [`get`](Self::get) but hands out a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = match self.store.slot(key) {
            Some(id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                id
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };
        if P::PROMOTE_ON_ACCESS {
            self.store.move_to_front(id);
        }
        self.store.value_mut(id)
    }

    /// Looks up `key` without changing the eviction order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    /// Removes and returns the next victim, or `None` when empty.
    pub fn pop(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_call();
        let popped = self.store.pop(P::EVICT_FROM);
        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_found();
        }
        popped
    }

    /// Returns the entry [`pop`](Self::pop) would remove, leaving it in place.
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(0);
    /// cache.add(1, "one");
    /// cache.add(2, "two");
    /// assert_eq!(cache.peek_victim(), Some((&1, &"one")));
    /// cache.get(&1);
    /// assert_eq!(cache.peek_victim(), Some((&2, &"two")));
    /// ```
    #[inline]
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        self.store.peek(P::EVICT_FROM)
    }

    /// Removes `key` regardless of its position.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let removed = self.store.remove(key);
        #[cfg(feature = "metrics")]
        if removed.is_some() {
            self.metrics.record_remove_found();
        }
        removed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The configured bound; `0` means unbounded.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Policy name, e.g. `"lru"`.
    #[inline]
    pub fn policy_name(&self) -> &'static str {
        P::NAME
    }

    /// Removes every entry. Allocations are kept, so refilling is cheap.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        tracing::debug!(
            policy = P::NAME,
            dropped = self.store.len(),
            "cache cleared"
        );
        self.store.clear();
    }

    /// Removes every entry and releases the memory backing them.
    pub fn clear_shrink(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        tracing::debug!(
            policy = P::NAME,
            dropped = self.store.len(),
            "cache cleared and shrunk"
        );
        self.store.clear_shrink();
    }

    /// Iterates entries from front to back without promoting them.
    ///
    /// The front is the newest entry for FIFO and the most recently used one
    /// for LRU and MRU.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }

    /// Verifies index/list agreement and the entry bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.check_invariants()?;
        if self.max_entries != 0 && self.store.len() > self.max_entries {
            return Err(InvariantError::new(format!(
                "{} entries exceed bound of {}",
                self.store.len(),
                self.max_entries
            )));
        }
        Ok(())
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.max_entries != 0 && self.store.len() >= self.max_entries
    }

    fn evict(&mut self) {
        if self.store.pop(P::EVICT_FROM).is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            tracing::trace!(
                policy = P::NAME,
                max_entries = self.max_entries,
                len = self.store.len(),
                "evicted entry"
            );
        }
    }
}

impl<K, V, P> Default for OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    /// Creates an unbounded cache.
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K, V, P> fmt::Debug for OrderedCache<K, V, P>
where
    P: EvictionPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedCache")
            .field("policy", &P::NAME)
            .field("max_entries", &self.max_entries)
            .field("len", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl<K, V, P> Extend<(K, V)> for OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K, V, P> CoreCache<K, V> for OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    #[inline]
    fn add(&mut self, key: K, value: V) -> Option<V> {
        OrderedCache::add(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        OrderedCache::get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        OrderedCache::peek(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        OrderedCache::contains(self, key)
    }

    #[inline]
    fn pop(&mut self) -> Option<(K, V)> {
        OrderedCache::pop(self)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        OrderedCache::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        OrderedCache::len(self)
    }

    #[inline]
    fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn clear(&mut self) {
        OrderedCache::clear(self);
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P> OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    /// Returns a snapshot of the cache's counters.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.max_entries)
    }

    /// Zeroes the counters without touching the entries.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P> MetricsSnapshotProvider<CacheMetricsSnapshot> for OrderedCache<K, V, P>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}
