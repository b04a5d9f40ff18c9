//! Doubly linked list backed by a [`SlotArena`].
//!
//! Nodes are stored in the arena and linked by [`SlotId`], giving stable
//! handles and O(1) splicing without raw pointers.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_0   │ { value: C, prev: None,    next: id_1 }     │
//!   │ id_1   │ { value: B, prev: id_0,    next: id_2 }     │
//!   │ id_2   │ { value: A, prev: id_1,    next: None }     │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (front) ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── tail (back)
//! ```
//!
//! | Operation                     | Time |
//! |-------------------------------|------|
//! | `push_front`                  | O(1) |
//! | `pop_front` / `pop_back`      | O(1) |
//! | `move_to_front` / `remove`    | O(1) |
//! | `iter` / `check_links`        | O(n) |
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Linked list whose nodes live in a [`SlotArena`].
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Links `value` in at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves `id` to the front; returns `false` if it is not in the list.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Drops every node. Allocations are kept for reuse.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Drops every node and releases the arena's memory.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.arena.shrink_to_fit();
    }

    /// Iterates `(SlotId, &T)` from front to back.
    pub fn iter_entries(&self) -> IntrusiveListEntryIter<'_, T> {
        IntrusiveListEntryIter {
            list: self,
            current: self.head,
            remaining: self.len(),
        }
    }

    /// Walks the links front to back and checks that they agree with the arena.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.arena.is_empty() {
                return Err(InvariantError::new(
                    "list head/tail disagree with an empty arena",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("list links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("prev link does not match walk order"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("last reachable node is not the tail"));
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable but arena holds {}",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(SlotId, &T)` pairs from front to back.
pub struct IntrusiveListEntryIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for IntrusiveListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntrusiveListEntryIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter_entries().map(|(_, v)| *v).collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.len(), 3);
        list.check_links().unwrap();
    }

    #[test]
    fn pop_both_ends() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_links().unwrap();
    }

    #[test]
    fn move_to_front_edges() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        // already at the front
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        // from the back
        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back_id(), Some(b));

        // from the middle
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        list.check_links().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(a));

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        list.check_links().unwrap();
    }

    #[test]
    fn clear_then_reuse() {
        let mut list = IntrusiveList::with_capacity(4);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);

        list.push_front(3);
        assert_eq!(values(&list), vec![3]);

        list.clear_shrink();
        assert!(list.is_empty());
        list.push_front(4);
        assert_eq!(values(&list), vec![4]);
        list.check_links().unwrap();
    }

    #[test]
    fn get_mut_changes_value_not_position() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(10);
        list.push_front(20);
        if let Some(v) = list.get_mut(a) {
            *v = 11;
        }
        assert_eq!(values(&list), vec![20, 11]);
    }

    #[test]
    fn iter_entries_reports_exact_len() {
        let mut list = IntrusiveList::new();
        for i in 0..5 {
            list.push_front(i);
        }
        assert_eq!(list.iter_entries().len(), 5);
    }
}
