//! Cache factory: pick an eviction policy at runtime.
//!
//! [`CachePolicy`] names a policy, [`CacheBuilder`] (or the shorthand
//! [`new_cache`]) turns it into a [`Cache`], which dispatches every operation
//! to the concrete policy cache it holds.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.add(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```
//!
//! Policies that come from configuration files or the wire arrive as numbers
//! or names. Converting them is the only fallible step:
//!
//! ```rust
//! use evictkit::builder::{CachePolicy, new_cache};
//!
//! let policy = CachePolicy::try_from(2u8).unwrap();
//! assert_eq!(policy, CachePolicy::Mru);
//!
//! let cache = new_cache::<&str, u32>("fifo".parse().unwrap(), 0);
//! assert_eq!(cache.policy(), CachePolicy::Fifo);
//! assert!(CachePolicy::try_from(9u8).is_err());
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::concurrent::Concurrent;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::fifo::FifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::store::Iter;
use crate::traits::CoreCache;

/// Available eviction policies.
///
/// The numeric values are stable and may be stored or sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CachePolicy {
    /// First In, First Out eviction.
    Fifo = 0,
    /// Least Recently Used eviction.
    Lru = 1,
    /// Most Recently Used eviction.
    Mru = 2,
}

impl CachePolicy {
    /// Every policy, in discriminator order.
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Fifo, CachePolicy::Lru, CachePolicy::Mru];

    /// Lower-case name, as accepted by `str::parse`.
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lru => "lru",
            CachePolicy::Mru => "mru",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CachePolicy> for u8 {
    fn from(policy: CachePolicy) -> Self {
        policy as u8
    }
}

impl TryFrom<u8> for CachePolicy {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CachePolicy::Fifo),
            1 => Ok(CachePolicy::Lru),
            2 => Ok(CachePolicy::Mru),
            other => Err(ConfigError::new(format!(
                "unknown cache policy discriminator: {}",
                other
            ))),
        }
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Parses a policy name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::new(format!("unknown cache policy: {}", name)))
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Fifo(FifoCache<K, V>),
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Mru(_) => CachePolicy::Mru,
        }
    }

    /// Insert or update a key-value pair. Returns the previous value if the
    /// key existed.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.add(key, value),
            CacheInner::Lru(lru) => lru.add(key, value),
            CacheInner::Mru(mru) => mru.add(key, value),
        }
    }

    /// Get a reference to a value by key, promoting it if the policy does.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.get(key),
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Mru(mru) => mru.get(key),
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.get_mut(key),
            CacheInner::Lru(lru) => lru.get_mut(key),
            CacheInner::Mru(mru) => mru.get_mut(key),
        }
    }

    /// Get a reference to a value without touching the eviction order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.peek(key),
            CacheInner::Lru(lru) => lru.peek(key),
            CacheInner::Mru(mru) => mru.peek(key),
        }
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.contains(key),
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Mru(mru) => mru.contains(key),
        }
    }

    /// Remove and return the policy's next victim.
    pub fn pop(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.pop(),
            CacheInner::Lru(lru) => lru.pop(),
            CacheInner::Mru(mru) => mru.pop(),
        }
    }

    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.peek_victim(),
            CacheInner::Lru(lru) => lru.peek_victim(),
            CacheInner::Mru(mru) => mru.peek_victim(),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.remove(key),
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Mru(mru) => mru.remove(key),
        }
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.len(),
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Mru(mru) => mru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the entry bound; `0` means unbounded.
    pub fn max_entries(&self) -> usize {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.max_entries(),
            CacheInner::Lru(lru) => lru.max_entries(),
            CacheInner::Mru(mru) => mru.max_entries(),
        }
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.clear(),
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Mru(mru) => mru.clear(),
        }
    }

    /// Clear all entries and release their memory.
    pub fn clear_shrink(&mut self) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.clear_shrink(),
            CacheInner::Lru(lru) => lru.clear_shrink(),
            CacheInner::Mru(mru) => mru.clear_shrink(),
        }
    }

    /// Iterate entries front to back without promoting them.
    pub fn iter(&self) -> Iter<'_, K, V> {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.iter(),
            CacheInner::Lru(lru) => lru.iter(),
            CacheInner::Mru(mru) => mru.iter(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.check_invariants(),
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Mru(mru) => mru.check_invariants(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy())
            .field("max_entries", &self.max_entries())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn add(&mut self, key: K, value: V) -> Option<V> {
        Cache::add(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        Cache::peek(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn pop(&mut self) -> Option<(K, V)> {
        Cache::pop(self)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Cache::remove(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn max_entries(&self) -> usize {
        Cache::max_entries(self)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }
}

#[cfg(feature = "metrics")]
impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.metrics_snapshot(),
            CacheInner::Lru(lru) => lru.metrics_snapshot(),
            CacheInner::Mru(mru) => mru.metrics_snapshot(),
        }
    }

    pub fn reset_metrics(&mut self) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.reset_metrics(),
            CacheInner::Lru(lru) => lru.reset_metrics(),
            CacheInner::Mru(mru) => mru.reset_metrics(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// A [`Cache`] behind a mutex, as returned by
/// [`CacheBuilder::build_concurrent`].
pub type SharedCache<K, V> = Concurrent<Cache<K, V>, K, V>;

/// Plain settings for [`CacheBuilder::from_config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entry bound; `0` means unbounded.
    pub max_entries: usize,
    /// Allocate the index and ordering list for `max_entries` up front.
    pub prealloc: bool,
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified bound (`0` = unbounded).
    pub fn new(max_entries: usize) -> Self {
        Self {
            config: CacheConfig {
                max_entries,
                prealloc: false,
            },
        }
    }

    /// Create a builder from stored settings.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Reserve storage for the full bound when the cache is built.
    ///
    /// Ignored for unbounded caches.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Build a cache with the specified policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let mut cache = CacheBuilder::new(2)
    ///     .prealloc(true)
    ///     .build::<u64, &str>(CachePolicy::Mru);
    /// cache.add(1, "a");
    /// cache.add(2, "b");
    /// cache.get(&1);
    /// cache.add(3, "c");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let CacheConfig {
            max_entries,
            prealloc,
        } = self.config;
        let prealloc = prealloc && max_entries != 0;

        tracing::debug!(
            policy = policy.name(),
            max_entries,
            prealloc,
            "building cache"
        );

        let inner = match (policy, prealloc) {
            (CachePolicy::Fifo, false) => CacheInner::Fifo(FifoCache::new(max_entries)),
            (CachePolicy::Fifo, true) => CacheInner::Fifo(FifoCache::preallocated(max_entries)),
            (CachePolicy::Lru, false) => CacheInner::Lru(LruCache::new(max_entries)),
            (CachePolicy::Lru, true) => CacheInner::Lru(LruCache::preallocated(max_entries)),
            (CachePolicy::Mru, false) => CacheInner::Mru(MruCache::new(max_entries)),
            (CachePolicy::Mru, true) => CacheInner::Mru(MruCache::preallocated(max_entries)),
        };

        Cache { inner }
    }

    /// Build a cache and wrap it for sharing between threads.
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = Arc::new(CacheBuilder::new(64).build_concurrent::<u32, u32>(CachePolicy::Lru));
    /// let writer = {
    ///     let cache = Arc::clone(&cache);
    ///     std::thread::spawn(move || cache.add(1, 10))
    /// };
    /// writer.join().unwrap();
    /// assert_eq!(cache.get(&1), Some(10));
    /// ```
    pub fn build_concurrent<K, V>(self, policy: CachePolicy) -> SharedCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        Concurrent::new(self.build(policy))
    }
}

/// Construct a cache for `policy` holding at most `max_entries` entries
/// (`0` = unbounded).
pub fn new_cache<K, V>(policy: CachePolicy, max_entries: usize) -> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    CacheBuilder::new(max_entries).build(policy)
}
