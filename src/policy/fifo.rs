//! FIFO (First In, First Out) eviction.
//!
//! Entries leave in the order they arrived. Reads and value updates never
//! change that order.
//!
//! ```text
//!   add(a) add(b) add(c)           get(a)                 add(d), bound = 3
//!
//!   front             back         front             back  front             back
//!   [c] ◄──► [b] ◄──► [a]    ──►   [c] ◄──► [b] ◄──► [a]   [d] ◄──► [c] ◄──► [b]
//!                      ▲                                    a evicted (oldest)
//!                   oldest
//! ```
//!
//! | Operation        | Reorders? | Time |
//! |------------------|-----------|------|
//! | `add` (new)      | front     | O(1) |
//! | `add` (existing) | no        | O(1) |
//! | `get`            | no        | O(1) |
//! | `pop`            | from back | O(1) |
//! | `remove`         | -         | O(1) |
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//!
//! let mut cache = FifoCache::new(2);
//! cache.add("a", 1);
//! cache.add("b", 2);
//!
//! // Reading "a" does not save it.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.add("c", 3);
//!
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.pop(), Some(("b", 2)));
//! ```

use crate::policy::ordered::{EvictionPolicy, OrderedCache};
use crate::store::End;

/// Insertion-order policy marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fifo;

impl EvictionPolicy for Fifo {
    const NAME: &'static str = "fifo";
    const PROMOTE_ON_ACCESS: bool = false;
    const EVICT_FROM: End = End::Back;
}

/// Cache that evicts the oldest inserted entry.
pub type FifoCache<K, V> = OrderedCache<K, V, Fifo>;

#[cfg(test)]
mod tests {
    use super::*;

    fn order<V>(cache: &FifoCache<&'static str, V>) -> Vec<&'static str> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    // ==============================================
    // Basic operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: FifoCache<&str, i32> = FifoCache::new(10);
            assert!(cache.is_empty());
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.max_entries(), 10);
            assert_eq!(cache.policy_name(), "fifo");
        }

        #[test]
        fn add_and_get() {
            let mut cache = FifoCache::new(10);
            assert_eq!(cache.add("a", 1), None);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"missing"), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn update_returns_old_value_without_duplicating() {
            let mut cache = FifoCache::new(10);
            cache.add("k", 1);
            assert_eq!(cache.add("k", 2), Some(1));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"k"), Some(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn remove_present_and_absent() {
            let mut cache = FifoCache::new(10);
            cache.add("a", 1);
            cache.add("b", 2);

            assert_eq!(cache.remove(&"a"), Some(1));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.remove(&"a"), None);
            assert_eq!(cache.remove(&"zzz"), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn pop_on_empty_is_none() {
            let mut cache: FifoCache<u32, u32> = FifoCache::new(3);
            assert_eq!(cache.pop(), None);
            assert_eq!(cache.peek_victim(), None);
            assert_eq!(cache.len(), 0);
        }
    }

    // ==============================================
    // FIFO ordering
    // ==============================================

    mod fifo_behavior {
        use super::*;

        #[test]
        fn evicts_oldest_regardless_of_gets() {
            let mut cache = FifoCache::new(2);
            cache.add("a", 1);
            cache.add("b", 2);
            cache.get(&"a");
            cache.get(&"a");
            cache.add("c", 3);

            assert!(!cache.contains(&"a"));
            assert!(cache.contains(&"b"));
            assert!(cache.contains(&"c"));
        }

        #[test]
        fn update_does_not_refresh_position() {
            let mut cache = FifoCache::new(3);
            cache.add("a", 1);
            cache.add("b", 2);
            cache.add("c", 3);
            cache.add("a", 10);

            assert_eq!(order(&cache), vec!["c", "b", "a"]);
            assert_eq!(cache.peek_victim(), Some((&"a", &10)));
        }

        #[test]
        fn pop_drains_in_insertion_order() {
            let mut cache = FifoCache::new(0);
            for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
                cache.add(key, i);
            }
            cache.get(&"c");

            let drained: Vec<_> = std::iter::from_fn(|| cache.pop()).map(|(k, _)| k).collect();
            assert_eq!(drained, vec!["a", "b", "c", "d"]);
        }

        #[test]
        fn remove_middle_keeps_remaining_order() {
            let mut cache = FifoCache::new(0);
            cache.add("a", 1);
            cache.add("b", 2);
            cache.add("c", 3);
            cache.remove(&"b");

            assert_eq!(order(&cache), vec!["c", "a"]);
            assert_eq!(cache.pop(), Some(("a", 1)));
        }
    }

    // ==============================================
    // Bound and clear
    // ==============================================

    mod bound_and_clear {
        use super::*;

        #[test]
        fn exactly_one_eviction_per_overflow() {
            let mut cache = FifoCache::new(3);
            for i in 0..3 {
                cache.add(i, i);
            }
            cache.add(3, 3);
            assert_eq!(cache.len(), 3);
            assert!(!cache.contains(&0));
            assert!(cache.contains(&1));
        }

        #[test]
        fn unbounded_grows() {
            let mut cache = FifoCache::new(0);
            for i in 0..500 {
                cache.add(i, i);
            }
            assert_eq!(cache.len(), 500);
        }

        #[test]
        fn clear_is_idempotent_and_reusable() {
            let mut cache = FifoCache::new(4);
            cache.clear();
            assert_eq!(cache.len(), 0);

            cache.add("a", 1);
            cache.add("b", 2);
            cache.clear();
            cache.clear();
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.get(&"a"), None);
            assert_eq!(cache.get(&"b"), None);

            cache.add("c", 3);
            assert_eq!(cache.get(&"c"), Some(&3));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn single_entry_bound() {
            let mut cache = FifoCache::new(1);
            cache.add("a", 1);
            cache.add("b", 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"b"), Some(&2));
            assert!(!cache.contains(&"a"));
        }
    }
}
