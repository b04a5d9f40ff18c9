//! # Cache Contract
//!
//! Every eviction policy and the enum-dispatched
//! [`Cache`](crate::builder::Cache) implement [`CoreCache`], so code written
//! against the trait works with any of them. The
//! [`Concurrent`](crate::concurrent::Concurrent) decorator wraps any
//! implementor and offers the same operations through `&self`.
//!
//! ```text
//!   ┌─────────────────────────────────────────────┐
//!   │               CoreCache<K, V>               │
//!   │                                             │
//!   │  add(&mut, K, V)    → Option<V>   (old)     │
//!   │  get(&mut, &K)      → Option<&V>  promotes  │
//!   │  peek(&, &K)        → Option<&V>            │
//!   │  contains(&, &K)    → bool                  │
//!   │  pop(&mut)          → Option<(K, V)>        │
//!   │  remove(&mut, &K)   → Option<V>             │
//!   │  len(&) / is_empty(&) / max_entries(&)      │
//!   │  clear(&mut)                                │
//!   └──────────────────────┬──────────────────────┘
//!                          │
//!        ┌─────────────────┼──────────────────┬──────────────────┐
//!        ▼                 ▼                  ▼                  ▼
//!   FifoCache          LruCache           MruCache          builder::Cache
//!
//!   Concurrent<C: CoreCache>: same operations via &self, behind a mutex
//! ```
//!
//! ## Policy Comparison
//!
//! | Policy | `get` / update-`add` promotes | New entries | `pop` removes |
//! |--------|-------------------------------|-------------|---------------|
//! | FIFO   | no                            | front       | back (oldest) |
//! | LRU    | yes, to front                 | front       | back          |
//! | MRU    | yes, to front                 | front       | front         |
//!
//! ## Absence
//!
//! There are no error paths: a miss is `None` from `get`/`remove`, and `pop`
//! on an empty cache is `None`, which callers treat as "nothing to do".
//!
//! ## Thread Safety
//!
//! Policy caches take `&mut self` and are not internally synchronized. Wrap one
//! in [`Concurrent`](crate::concurrent::Concurrent) to share it between
//! threads; the decorator implements the [`ConcurrentCache`] marker.

/// The operations every cache supports.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.add(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(2);
/// warm(&mut cache, &[(1, "one"), (2, "two"), (3, "three")]);
/// assert_eq!(cache.len(), 2);
/// assert!(!cache.contains(&1));
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value.
    ///
    /// A new key is linked at the front. When the cache is bounded and full,
    /// exactly one entry is evicted according to the policy.
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = FifoCache::new(10);
    /// assert_eq!(cache.add("k", 1), None);
    /// assert_eq!(cache.add("k", 2), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn add(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, applying the policy's promotion rule on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Looks up `key` without affecting eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present. Never promotes.
    fn contains(&self, key: &K) -> bool {
        self.peek(key).is_some()
    }

    /// Removes and returns the entry the policy would evict next.
    ///
    /// ```
    /// use evictkit::policy::mru::MruCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = MruCache::new(0);
    /// cache.add(1, "a");
    /// cache.add(2, "b");
    /// cache.get(&1);
    /// assert_eq!(cache.pop(), Some((1, "a")));
    /// assert_eq!(cache.pop(), Some((2, "b")));
    /// assert_eq!(cache.pop(), None);
    /// ```
    fn pop(&mut self) -> Option<(K, V)>;

    /// Removes `key` regardless of where it sits in the eviction order.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Current number of entries. O(1).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured bound on the number of entries; `0` means unbounded.
    fn max_entries(&self) -> usize;

    /// Removes every entry. The cache stays usable afterwards.
    fn clear(&mut self);
}

impl<K, V, C> CoreCache<K, V> for Box<C>
where
    C: CoreCache<K, V> + ?Sized,
{
    #[inline]
    fn add(&mut self, key: K, value: V) -> Option<V> {
        (**self).add(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        (**self).get(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        (**self).peek(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    #[inline]
    fn pop(&mut self) -> Option<(K, V)> {
        (**self).pop()
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn max_entries(&self) -> usize {
        (**self).max_entries()
    }

    #[inline]
    fn clear(&mut self) {
        (**self).clear()
    }
}

/// Marker for caches whose operations are safe to call from many threads.
///
/// ```
/// use evictkit::concurrent::Concurrent;
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::ConcurrentCache;
///
/// fn share<C: ConcurrentCache>(_cache: &C) {}
///
/// let cache = Concurrent::new(LruCache::<u32, String>::new(16));
/// share(&cache);
/// ```
pub trait ConcurrentCache: Send + Sync {}
