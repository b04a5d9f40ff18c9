//! LRU (Least Recently Used) eviction.
//!
//! A hit moves the entry to the front, so the back always holds the entry
//! that has gone unread the longest. Bound enforcement and [`pop`] remove
//! from the back.
//!
//! ```text
//!   bound = 2
//!
//!   add(a) add(b)     front [b] ◄──► [a] back
//!   get(a)            front [a] ◄──► [b] back     a promoted
//!   add(c)            front [c] ◄──► [a] back     b evicted from the back
//! ```
//!
//! Updating an existing key counts as a use and also promotes it.
//!
//! [`pop`]: crate::policy::ordered::OrderedCache::pop
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.add("a", 1);
//! cache.add("b", 2);
//! cache.get(&"a");
//! cache.add("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.pop(), Some(("a", 1)));
//! ```

use crate::policy::ordered::{EvictionPolicy, OrderedCache};
use crate::store::End;

/// Recency policy marker: promote on hit, evict the stalest entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Lru;

impl EvictionPolicy for Lru {
    const NAME: &'static str = "lru";
    const PROMOTE_ON_ACCESS: bool = true;
    const EVICT_FROM: End = End::Back;
}

/// Cache that evicts the least recently used entry.
pub type LruCache<K, V> = OrderedCache<K, V, Lru>;
