//! MRU (Most Recently Used) eviction.
//!
//! Hits promote exactly as in LRU, but the victim is taken from the front:
//! the entry touched last goes first. This suits cyclic scans larger than the
//! cache, where the item just read is the one least likely to be needed again.
//!
//! ```text
//!   bound = 2
//!
//!   add(a) add(b)     front [b] ◄──► [a] back
//!   get(a)            front [a] ◄──► [b] back     a promoted
//!   add(c)            a evicted from the front, then c linked
//!                     front [c] ◄──► [b] back
//! ```
//!
//! The victim is chosen before `c` is linked; otherwise the incoming key would
//! be the most recently used entry and evict itself.
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//!
//! let mut cache = MruCache::new(2);
//! cache.add("a", 1);
//! cache.add("b", 2);
//! cache.get(&"a");
//! cache.add("c", 3);
//!
//! assert!(!cache.contains(&"a"));
//! assert!(cache.contains(&"b"));
//! assert_eq!(cache.pop(), Some(("c", 3)));
//! ```

use crate::policy::ordered::{EvictionPolicy, OrderedCache};
use crate::store::End;

/// Recency policy marker: promote on hit, evict the freshest entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mru;

impl EvictionPolicy for Mru {
    const NAME: &'static str = "mru";
    const PROMOTE_ON_ACCESS: bool = true;
    const EVICT_FROM: End = End::Front;
}

/// Cache that evicts the most recently used entry.
pub type MruCache<K, V> = OrderedCache<K, V, Mru>;
