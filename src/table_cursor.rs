//! TableCursor: detached position over every pair of a `HashTable`.
//!
//! Composes a list [`Cursor`] for the current bucket and hops to the next
//! non-empty bucket when that chain runs out. The cursor records the
//! table's growth count when it is created; any later growth makes it
//! permanently invalid, since the chains it pointed into are gone.

use crate::hash_table::{HashTable, KeyValue};
use crate::list_cursor::Cursor;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    /// The table had no elements at creation. Terminal.
    Empty,
    At { bucket: usize, chain: Cursor },
    /// No non-empty bucket remained ahead.
    Exhausted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableCursor {
    generation: u64,
    position: Position,
}

impl TableCursor {
    /// Position at the first pair in bucket order.
    pub fn new<V>(table: &HashTable<V>) -> Self {
        let position = if table.is_empty() {
            Position::Empty
        } else {
            match table.next_occupied(0) {
                Some(bucket) => Position::At {
                    bucket,
                    chain: Cursor::new(&table.chains()[bucket]),
                },
                None => Position::Exhausted,
            }
        };
        Self {
            generation: table.generation(),
            position,
        }
    }

    pub fn is_valid<V>(&self, table: &HashTable<V>) -> bool {
        if table.is_empty() || self.generation != table.generation() {
            return false;
        }
        match self.position {
            Position::At { bucket, chain } => table
                .chains()
                .get(bucket)
                .is_some_and(|list| chain.is_valid(list)),
            Position::Empty | Position::Exhausted => false,
        }
    }

    /// Step to the next pair, crossing into later buckets as chains run
    /// out. Returns false, and stays invalid, once no pair remains.
    pub fn advance<V>(&mut self, table: &HashTable<V>) -> bool {
        if !self.is_valid(table) {
            return false;
        }
        let Position::At { bucket, mut chain } = self.position else {
            return false;
        };
        let chains = table.chains();
        if chain.advance(&chains[bucket]) {
            self.position = Position::At { bucket, chain };
            return true;
        }
        match table.next_occupied(bucket + 1) {
            Some(next) => {
                self.position = Position::At {
                    bucket: next,
                    chain: Cursor::new(&chains[next]),
                };
                true
            }
            None => {
                self.position = Position::Exhausted;
                false
            }
        }
    }

    pub fn get<'a, V>(&self, table: &'a HashTable<V>) -> Option<&'a KeyValue<V>> {
        if !self.is_valid(table) {
            return None;
        }
        match self.position {
            Position::At { bucket, chain } => chain.get(&table.chains()[bucket]),
            Position::Empty | Position::Exhausted => None,
        }
    }

    /// Remove the current pair and hand it to the caller.
    ///
    /// The cursor advances before the pair is unlinked (by key), so the
    /// walk continues over the remaining pairs without skipping or
    /// repeating any. `None` if the cursor was already invalid.
    pub fn remove<V>(&mut self, table: &mut HashTable<V>) -> Option<KeyValue<V>> {
        let key = self.get(table)?.key;
        self.advance(table);
        table.remove(key)
    }
}
