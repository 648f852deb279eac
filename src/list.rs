//! Arena-backed doubly linked recency list.
//!
//! Nodes live in a growable table of slots and link to each other by slot
//! index. Slots 0 and 1 hold the head (MRU side) and tail (LRU side)
//! sentinels, which carry no value and are never handed out. Vacated slots
//! go onto a free list and are reused by the next allocation, so a list that
//! has reached its working size stops allocating.
//!
//! ```text
//!   slots: [ HEAD | TAIL | n2 | n3 | free | n5 ]
//!
//!   HEAD <-> n5 <-> n2 <-> n3 <-> TAIL
//!    MRU                         LRU
//! ```

extern crate alloc;

use crate::error::InvariantError;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Slot of the head sentinel (MRU boundary).
const HEAD: usize = 0;
/// Slot of the tail sentinel (LRU boundary).
const TAIL: usize = 1;
/// Link value of a slot that is not part of the ordering.
const UNLINKED: usize = usize::MAX;

/// Stable handle to a node stored in a [`List`].
///
/// A handle stays valid until the node is removed; after that the slot may be
/// reused by an unrelated node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

/// A slot in the arena.
struct Entry<T> {
    /// `None` for sentinels and free slots.
    val: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Entry<T> {
    fn new(val: T) -> Self {
        Entry {
            val: Some(val),
            prev: UNLINKED,
            next: UNLINKED,
        }
    }

    fn new_sigil() -> Self {
        Entry {
            val: None,
            prev: UNLINKED,
            next: UNLINKED,
        }
    }

    #[inline]
    fn is_linked(&self) -> bool {
        self.prev != UNLINKED
    }
}

/// A doubly linked list of values ordered from most to least recently used.
///
/// All link operations are O(1) and never traverse the list.
pub struct List<T> {
    slots: Vec<Entry<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `cap` nodes before it reallocates.
    pub fn with_capacity(cap: usize) -> List<T> {
        let mut slots = Vec::with_capacity(cap.saturating_add(2));
        slots.push(Entry::new_sigil());
        slots.push(Entry::new_sigil());
        slots[HEAD].next = TAIL;
        slots[TAIL].prev = HEAD;

        List {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked (live) nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `idx` names an occupied, linked, non-sentinel slot.
    fn is_live(&self, idx: usize) -> bool {
        idx > TAIL
            && self
                .slots
                .get(idx)
                .is_some_and(|e| e.val.is_some() && e.is_linked())
    }

    /// Stores `val` in a vacant slot without linking it.
    ///
    /// The returned node is detached; hand it to
    /// [`insert_at_mru`](Self::insert_at_mru) to make it part of the ordering.
    pub fn alloc(&mut self, val: T) -> NodeIndex {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Entry::new(val);
                NodeIndex(idx)
            }
            None => {
                self.slots.push(Entry::new(val));
                NodeIndex(self.slots.len() - 1)
            }
        }
    }

    /// Links a detached node directly after the head sentinel.
    pub fn insert_at_mru(&mut self, node: NodeIndex) {
        let idx = node.0;
        debug_assert!(
            idx > TAIL && self.slots[idx].val.is_some(),
            "insert_at_mru on a sentinel or vacant slot"
        );
        debug_assert!(
            !self.slots[idx].is_linked(),
            "insert_at_mru on a node that is already linked"
        );

        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
        self.len += 1;
    }

    /// Allocates a node for `val` and links it as the most recently used.
    pub fn push_front(&mut self, val: T) -> NodeIndex {
        let node = self.alloc(val);
        self.insert_at_mru(node);
        node
    }

    /// Unlinks a live node, joining its neighbours directly. The value stays
    /// in its slot so the node can be re-inserted.
    ///
    /// Detaching a sentinel, a vacant slot or an already detached node is a
    /// contract violation: it trips a debug assertion and is otherwise
    /// ignored.
    pub fn detach(&mut self, node: NodeIndex) {
        let idx = node.0;
        let live = self.is_live(idx);
        debug_assert!(live, "detach on a sentinel, vacant or detached slot");
        if !live {
            return;
        }

        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.slots[idx].prev = UNLINKED;
        self.slots[idx].next = UNLINKED;
        self.len -= 1;
    }

    /// Unlinks a live node, frees its slot and returns its value.
    ///
    /// Returns `None` (after a debug assertion) if `node` is not live.
    pub fn remove(&mut self, node: NodeIndex) -> Option<T> {
        if !self.is_live(node.0) {
            debug_assert!(false, "remove on a sentinel, vacant or detached slot");
            return None;
        }
        self.detach(node);
        self.release(node.0)
    }

    /// Takes the value out of a detached slot and puts the slot on the free list.
    fn release(&mut self, idx: usize) -> Option<T> {
        let val = self.slots[idx].val.take();
        self.free.push(idx);
        val
    }

    /// Moves a live node to the MRU end.
    pub fn move_to_front(&mut self, node: NodeIndex) {
        if self.slots[HEAD].next == node.0 {
            return;
        }
        self.detach(node);
        self.insert_at_mru(node);
    }

    /// Removes the node adjacent to the tail sentinel and returns its value,
    /// or `None` when the list is empty.
    pub fn pop_lru(&mut self) -> Option<T> {
        let lru = self.slots[TAIL].prev;
        if lru == HEAD {
            return None;
        }
        self.remove(NodeIndex(lru))
    }

    /// The value of the node adjacent to the tail sentinel.
    pub fn peek_lru(&self) -> Option<&T> {
        self.slots[self.slots[TAIL].prev].val.as_ref()
    }

    /// The value held by `node`, or `None` for sentinels and vacant slots.
    #[inline]
    pub fn get(&self, node: NodeIndex) -> Option<&T> {
        self.slots.get(node.0).and_then(|e| e.val.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeIndex) -> Option<&mut T> {
        self.slots.get_mut(node.0).and_then(|e| e.val.as_mut())
    }

    /// Swaps the value held by `node` in place and returns the old one.
    /// The node's position is unchanged.
    pub fn replace(&mut self, node: NodeIndex, val: T) -> Option<T> {
        let slot = self.get_mut(node)?;
        Some(core::mem::replace(slot, val))
    }

    /// Drops every node and releases all slots except the sentinels.
    pub fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    /// Iterates live nodes from MRU to LRU.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    /// Walks the list in both directions and checks that the links, the
    /// length and the slot bookkeeping agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0;
        let mut prev = HEAD;
        let mut cur = self.slots[HEAD].next;
        while cur != TAIL {
            if count >= self.len {
                return Err(InvariantError::new(format!(
                    "forward walk exceeds recorded length {}",
                    self.len
                )));
            }
            let entry = self.slots.get(cur).ok_or_else(|| {
                InvariantError::new(format!("link to out-of-range slot {cur}"))
            })?;
            if cur == HEAD || entry.val.is_none() {
                return Err(InvariantError::new(format!(
                    "slot {cur} is linked but holds no value"
                )));
            }
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {cur} points back to {} instead of {prev}",
                    entry.prev
                )));
            }
            count += 1;
            prev = cur;
            cur = entry.next;
        }
        if self.slots[TAIL].prev != prev {
            return Err(InvariantError::new(
                "tail sentinel does not point back to the last node",
            ));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "forward walk found {count} nodes, recorded length is {}",
                self.len
            )));
        }

        let occupied = self.slots[2..].iter().filter(|e| e.val.is_some()).count();
        if occupied != self.len {
            return Err(InvariantError::new(format!(
                "{occupied} occupied slots but {} linked nodes",
                self.len
            )));
        }
        if self.slots.len() != 2 + self.len + self.free.len() {
            return Err(InvariantError::new(format!(
                "{} slots do not add up to {} live + {} free + 2 sentinels",
                self.slots.len(),
                self.len,
                self.free.len()
            )));
        }
        if let Some(&idx) = self.free.iter().find(|&&idx| {
            idx <= TAIL || self.slots[idx].val.is_some() || self.slots[idx].is_linked()
        }) {
            return Err(InvariantError::new(format!(
                "free list holds slot {idx} which is in use"
            )));
        }
        Ok(())
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// MRU→LRU iterator over a [`List`], yielding each node with its handle.
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeIndex, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        let entry = &self.list.slots[idx];
        self.front = entry.next;
        self.remaining -= 1;
        entry.val.as_ref().map(|v| (NodeIndex(idx), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        let entry = &self.list.slots[idx];
        self.back = entry.prev;
        self.remaining -= 1;
        entry.val.as_ref().map(|v| (NodeIndex(idx), v))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn values(list: &List<u32>) -> Vec<u32> {
        list.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = List::<u32>::with_capacity(3);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.peek_lru().is_none());
        assert_eq!(list.iter().count(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = List::with_capacity(3);
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec![30, 20, 10]);
        assert_eq!(list.peek_lru(), Some(&10));
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_pop_lru() {
        let mut list = List::with_capacity(3);

        assert!(list.pop_lru().is_none());

        list.push_front(10);
        list.push_front(20);
        list.push_front(30);

        assert_eq!(list.pop_lru(), Some(10));
        assert_eq!(list.pop_lru(), Some(20));
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_lru(), Some(30));
        assert!(list.pop_lru().is_none());
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);

        // front->30->20->10->back
        let node1 = list.push_front(10);
        let _node2 = list.push_front(20);
        let node3 = list.push_front(30);

        list.move_to_front(node1);
        assert_eq!(values(&list), vec![10, 30, 20]);

        // Already at the front: no change.
        list.move_to_front(node1);
        assert_eq!(values(&list), vec![10, 30, 20]);

        list.move_to_front(node3);
        assert_eq!(values(&list), vec![30, 10, 20]);
        assert_eq!(list.len(), 3, "move_to_front must not change length");
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_detach_and_reinsert() {
        let mut list = List::with_capacity(3);
        let a = list.push_front(1);
        let b = list.push_front(2);
        let _c = list.push_front(3);

        list.detach(b);
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec![3, 1]);
        // The value survives the detach.
        assert_eq!(list.get(b), Some(&2));

        list.insert_at_mru(b);
        assert_eq!(values(&list), vec![2, 3, 1]);

        list.detach(a);
        list.insert_at_mru(a);
        assert_eq!(values(&list), vec![1, 2, 3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_alloc_is_detached_until_inserted() {
        let mut list = List::with_capacity(2);
        let node = list.alloc(7);
        assert_eq!(list.len(), 0);
        assert_eq!(list.get(node), Some(&7));
        assert!(list.check_invariants().is_err());

        list.insert_at_mru(node);
        assert_eq!(list.len(), 1);
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_middle_node() {
        let mut list = List::with_capacity(4);
        let _a = list.push_front(1);
        let b = list.push_front(2);
        let _c = list.push_front(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(values(&list), vec![3, 1]);
        assert_eq!(list.get(b), None);
        list.check_invariants().unwrap();
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "remove on a sentinel"))]
    fn test_remove_sentinel_is_contract_violation() {
        let mut list = List::<u32>::with_capacity(1);
        list.push_front(1);
        assert_eq!(list.remove(NodeIndex(HEAD)), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "remove on a sentinel"))]
    fn test_double_remove_is_contract_violation() {
        let mut list = List::with_capacity(1);
        let node = list.push_front(1);
        assert_eq!(list.remove(node), Some(1));
        assert_eq!(list.remove(node), None);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(1);
        list.push_front(2);
        assert_eq!(list.slots.len(), 4);

        list.remove(a);
        let c = list.push_front(3);
        assert_eq!(c, a, "vacated slot should be recycled");
        assert_eq!(list.slots.len(), 4);

        for i in 0..100 {
            list.pop_lru();
            list.push_front(i);
        }
        assert_eq!(list.slots.len(), 4);
        list.check_invariants().unwrap();
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = List::<String>::with_capacity(2);
        let a = list.push_front(String::from("one"));
        list.push_front(String::from("two"));

        let old = list.replace(a, String::from("uno"));
        assert_eq!(old.as_deref(), Some("one"));
        assert_eq!(list.peek_lru().map(String::as_str), Some("uno"));

        list.get_mut(a).unwrap().push_str("_modified");
        assert_eq!(list.get(a).map(String::as_str), Some("uno_modified"));
    }

    #[test]
    fn test_clear() {
        let mut list = List::with_capacity(3);
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.slots.len(), 2);
        list.check_invariants().unwrap();

        list.push_front(40);
        assert_eq!(values(&list), vec![40]);
    }

    #[test]
    fn test_iter_both_directions() {
        let mut list = List::with_capacity(4);
        for v in 1..=4 {
            list.push_front(v);
        }

        let rev: Vec<u32> = list.iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(rev, vec![1, 2, 3, 4]);

        let mut it = list.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next().map(|(_, v)| *v), Some(4));
        assert_eq!(it.next_back().map(|(_, v)| *v), Some(1));
        assert_eq!(it.next().map(|(_, v)| *v), Some(3));
        assert_eq!(it.next_back().map(|(_, v)| *v), Some(2));
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }

    #[test]
    fn test_invariant_check_detects_broken_link() {
        let mut list = List::with_capacity(3);
        list.push_front(1);
        let b = list.push_front(2);
        list.push_front(3);

        list.slots[b.0].prev = TAIL;
        let err = list.check_invariants().unwrap_err();
        assert!(err.message().contains("points back"));
    }
}
