//! Ordered key-value store shared by every eviction policy.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!   ┌─────────┬────────┐
//!   │   Key   │ SlotId │
//!   ├─────────┼────────┤
//!   │   "a"   │  id_2  │
//!   │   "b"   │  id_0  │
//!   │   "c"   │  id_1  │
//!   └─────────┴────────┘
//!
//!   list: IntrusiveList<Entry<K, V>>
//!
//!   front ─► [id_2: (a, 1)] ◄──► [id_1: (c, 3)] ◄──► [id_0: (b, 2)] ◄── back
//! ```
//!
//! Every entry is owned by exactly one list node; the index maps each key to
//! the handle of that node. The store never reorders on its own: callers
//! (the policy caches) decide when to promote and which end to pop.
//!
//! ## Invariants
//!
//! - The key set of the index equals the key set of the list.
//! - Each key maps to exactly one node; updates replace the value in place.
//!
//! [`OrderedStore::check_invariants`] verifies both in O(n).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveListEntryIter;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;

/// One end of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    /// Where new and promoted entries are linked.
    Front,
    /// The entry that has been at rest the longest.
    Back,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Hash index plus doubly linked ordering over `(K, V)` entries.
///
/// # Example
///
/// ```
/// use evictkit::store::{End, OrderedStore};
///
/// let mut store = OrderedStore::new();
/// let a = store.push_front("a", 1);
/// store.push_front("b", 2);
///
/// assert_eq!(store.peek(End::Back), Some((&"a", &1)));
/// store.move_to_front(a);
/// assert_eq!(store.pop(End::Back), Some(("b", 2)));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct OrderedStore<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
}

impl<K, V> OrderedStore<K, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<K, V> OrderedStore<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the handle of `key`'s node.
    #[inline]
    pub fn slot(&self, key: &K) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Looks up a value without touching the ordering.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.slot(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the value stored at `id`.
    pub fn value(&self, id: SlotId) -> Option<&V> {
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the value stored at `id` mutably. The key cannot be changed.
    pub fn value_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Replaces the value at `id` in place and returns the previous one.
    pub fn replace(&mut self, id: SlotId, value: V) -> Option<V> {
        self.value_mut(id).map(|slot| std::mem::replace(slot, value))
    }

    /// Links a new entry at the front.
    ///
    /// The key must not already be present; callers check with
    /// [`slot`](Self::slot) first. A duplicate key replaces the index entry and
    /// leaves the old node orphaned, which `check_invariants` reports.
    pub fn push_front(&mut self, key: K, value: V) -> SlotId {
        debug_assert!(!self.index.contains_key(&key), "duplicate key pushed");
        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        id
    }

    /// Moves `id` to the front; returns `false` for a stale handle.
    #[inline]
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        self.list.move_to_front(id)
    }

    /// Returns the entry at `end` without unlinking it.
    pub fn peek(&self, end: End) -> Option<(&K, &V)> {
        let id = match end {
            End::Front => self.list.front_id(),
            End::Back => self.list.back_id(),
        }?;
        self.list.get(id).map(|entry| (&entry.key, &entry.value))
    }

    /// Unlinks and returns the entry at `end`.
    pub fn pop(&mut self, end: End) -> Option<(K, V)> {
        let entry = match end {
            End::Front => self.list.pop_front(),
            End::Back => self.list.pop_back(),
        }?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Removes `key` wherever it sits in the ordering.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    /// Drops every entry, keeping allocations so the store can refill cheaply.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// Drops every entry and releases the memory held by the index and list.
    pub fn clear_shrink(&mut self) {
        self.list.clear_shrink();
        self.index = FxHashMap::default();
    }

    /// Iterates entries from front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter_entries(),
        }
    }

    /// Checks that the index and the list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_links()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, list holds {}",
                self.index.len(),
                self.list.len()
            )));
        }

        for (id, entry) in self.list.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == id => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index points at a different node than the one holding the key",
                    ));
                },
                None => {
                    return Err(InvariantError::new("list node key missing from index"));
                },
            }
        }
        Ok(())
    }
}

impl<K, V> Default for OrderedStore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    inner: IntrusiveListEntryIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
