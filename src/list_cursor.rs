//! Cursor: detached position inside a `LinkedList`.
//!
//! A cursor holds only a node key, never a borrow, so it can sit across
//! calls that mutate the list through it. Every operation takes the list
//! it was created from. A cursor whose node has been removed by some other
//! path reads as invalid; it never aliases a different node.

use crate::linked_list::{LinkedList, NodeKey};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    node: Option<NodeKey>,
}

impl Cursor {
    /// Position at the head, or invalid if the list is empty.
    pub fn new<T>(list: &LinkedList<T>) -> Self {
        Self {
            node: list.head_key(),
        }
    }

    /// True while the cursor points at a live node of `list`.
    pub fn is_valid<T>(&self, list: &LinkedList<T>) -> bool {
        self.node.is_some_and(|k| list.node(k).is_some())
    }

    /// Step to the following node; returns whether the new position is valid.
    /// An invalid cursor stays invalid and returns false.
    pub fn advance<T>(&mut self, list: &LinkedList<T>) -> bool {
        self.node = self.node.and_then(|k| list.node(k)).and_then(|n| n.next);
        self.node.is_some()
    }

    pub fn get<'a, T>(&self, list: &'a LinkedList<T>) -> Option<&'a T> {
        list.node(self.node?).map(|n| &n.payload)
    }

    pub fn get_mut<'a, T>(&self, list: &'a mut LinkedList<T>) -> Option<&'a mut T> {
        list.node_mut(self.node?).map(|n| &mut n.payload)
    }

    /// Unlink the current node, move to its successor, and return the
    /// payload to the caller. `None` if the cursor was invalid.
    ///
    /// Removing the tail (or the last node) leaves the cursor invalid.
    pub fn take<T>(&mut self, list: &mut LinkedList<T>) -> Option<T> {
        let node = list.unlink(self.node?)?;
        self.node = node.next;
        Some(node.payload)
    }

    /// Like [`take`](Self::take) but hands the payload to `release`.
    /// Returns whether the cursor still points at an element afterward.
    pub fn remove<T, F>(&mut self, list: &mut LinkedList<T>, release: F) -> bool
    where
        F: FnOnce(T),
    {
        match self.take(list) {
            Some(payload) => {
                release(payload);
                self.is_valid(list)
            }
            None => false,
        }
    }

    /// Reset to the list head.
    pub fn rewind<T>(&mut self, list: &LinkedList<T>) {
        self.node = list.head_key();
    }
}

impl<T> LinkedList<T> {
    /// Cursor positioned at the head.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }
}
