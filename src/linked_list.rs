//! LinkedList: order-preserving doubly-linked sequence over a generational arena.
//!
//! Nodes live in a per-list `SlotMap` and link to each other by `NodeKey`.
//! The list owns every node exclusively; a removed node's key never
//! resolves again, which is what lets detached cursors detect staleness.

use core::cmp::Ordering;
use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key of a node inside one list's arena.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) payload: T,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

/// Doubly-linked list with O(1) push/pop at the head, append/slice at the
/// tail, and O(1) removal at a [`Cursor`](crate::Cursor) position.
pub struct LinkedList<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.nodes[k].payload)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.nodes[k].payload)
    }

    /// Insert `payload` at the head.
    pub fn push(&mut self, payload: T) {
        let old_head = self.head;
        let key = self.nodes.insert(Node {
            payload,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.nodes[h].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
    }

    /// Remove and return the head payload; `None` on an empty list.
    pub fn pop(&mut self) -> Option<T> {
        let key = self.head?;
        self.unlink(key).map(|n| n.payload)
    }

    /// Insert `payload` at the tail.
    pub fn append(&mut self, payload: T) {
        let old_tail = self.tail;
        let key = self.nodes.insert(Node {
            payload,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.nodes[t].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Remove and return the tail payload; `None` on an empty list.
    pub fn slice(&mut self) -> Option<T> {
        let key = self.tail?;
        self.unlink(key).map(|n| n.payload)
    }

    /// Bubble sort by swapping payloads between adjacent nodes until a full
    /// pass makes no swap. Nodes keep their positions; only payloads move.
    ///
    /// With `ascending == false` the comparator's result is reversed.
    pub fn sort<F>(&mut self, ascending: bool, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }
        loop {
            let mut swapped = false;
            let mut cur = self.head;
            while let Some(a) = cur {
                let Some(b) = self.nodes[a].next else { break };
                let ord = compare(&self.nodes[a].payload, &self.nodes[b].payload);
                let out_of_order = if ascending {
                    ord == Ordering::Greater
                } else {
                    ord == Ordering::Less
                };
                if out_of_order {
                    if let Some([na, nb]) = self.nodes.get_disjoint_mut([a, b]) {
                        core::mem::swap(&mut na.payload, &mut nb.payload);
                        swapped = true;
                    }
                }
                cur = Some(b);
            }
            if !swapped {
                break;
            }
        }
    }

    /// Release every payload head to tail through `release`, then the list.
    pub fn free<F>(mut self, mut release: F)
    where
        F: FnMut(T),
    {
        while let Some(payload) = self.pop() {
            release(payload);
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len(),
        }
    }

    pub(crate) fn head_key(&self) -> Option<NodeKey> {
        self.head
    }

    pub(crate) fn node(&self, key: NodeKey) -> Option<&Node<T>> {
        self.nodes.get(key)
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node<T>> {
        self.nodes.get_mut(key)
    }

    /// Splice `key` out of the chain and hand back its node.
    ///
    /// Handles the four shapes separately: sole node, head, tail, middle.
    pub(crate) fn unlink(&mut self, key: NodeKey) -> Option<Node<T>> {
        let node = self.nodes.remove(key)?;
        match (node.prev, node.next) {
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
            (None, Some(next)) => {
                self.nodes[next].prev = None;
                self.head = Some(next);
            }
            (Some(prev), None) => {
                self.nodes[prev].next = None;
                self.tail = Some(prev);
            }
            (Some(prev), Some(next)) => {
                self.nodes[prev].next = Some(next);
                self.nodes[next].prev = Some(prev);
            }
        }
        debug_assert_eq!(self.nodes.is_empty(), self.head.is_none());
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());
        Some(node)
    }

    /// Walk the chain both ways and panic on any broken link or count.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        if self.is_empty() {
            assert!(self.head.is_none() && self.tail.is_none());
            return;
        }
        let head = self.head.expect("non-empty list has a head");
        assert!(self.nodes[head].prev.is_none(), "head.prev must be none");
        let tail = self.tail.expect("non-empty list has a tail");
        assert!(self.nodes[tail].next.is_none(), "tail.next must be none");

        let mut seen = 0;
        let mut prev = None;
        let mut cur = Some(head);
        while let Some(k) = cur {
            let n = &self.nodes[k];
            assert_eq!(n.prev, prev, "prev link disagrees with forward walk");
            seen += 1;
            assert!(seen <= self.len(), "cycle in forward links");
            prev = Some(k);
            cur = n.next;
        }
        assert_eq!(prev, Some(tail), "forward walk must end at tail");
        assert_eq!(seen, self.len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over payloads head to tail.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; pops from the head.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.slice()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for payload in iter {
            self.append(payload);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}
