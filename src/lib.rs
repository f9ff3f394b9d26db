//! chained-hashtable: a single-threaded key/value table with separate
//! chaining, built on an arena-backed doubly-linked list, with detached
//! cursors that survive mutation through themselves.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, verifiable stack of two containers where each layer
//!   has a precise contract and the upper one relies only on the lower
//!   one's public behavior.
//! - Layers:
//!   - LinkedList<T>: ordered sequence; nodes live in a per-list
//!     `SlotMap` and link by generational key. O(1) push/pop at the head,
//!     append/slice at the tail, removal at a cursor.
//!   - Cursor: detached list position (a node key). Operations borrow the
//!     list per call, so a cursor can remove the node it points at and keep
//!     walking.
//!   - HashTable<V>: `u64` keys, `key mod bucket_count` bucket selection,
//!     one LinkedList of `KeyValue<V>` per bucket. Grows by a fixed factor
//!     once the load threshold is reached.
//!   - TableCursor: detached position over all pairs, composing a list
//!     Cursor per bucket.
//!
//! Constraints
//! - Single-threaded. Nothing here synchronizes.
//! - Keys are unique within a chain at all times; insert replaces.
//! - Growth happens at the start of an insert when
//!   `len >= max_load_factor * bucket_count`; the new bucket count is
//!   `growth_factor * bucket_count` (defaults 3 and 9).
//!
//! Ownership transfer
//! - Operations that hand a value back (`pop`, `slice`, `Cursor::take`,
//!   `HashTable::insert` on replace, `HashTable::remove`,
//!   `TableCursor::remove`) move it to the caller; the container keeps no
//!   claim on it.
//! - `free(release)` on either container moves each payload into the
//!   supplied function; plain `Drop` just drops them.
//!
//! Growth without a new handle
//! - The table's buckets and count sit in an internal block. Growth moves
//!   every pair into a replacement block and swaps the blocks, so callers
//!   holding the table see the same table with more buckets.
//! - Growth invalidates outstanding `TableCursor`s; each cursor records the
//!   growth count at creation and compares it on every call.
//!
//! Cursor validity
//! - Removing a node through any other path makes a cursor pointing at it
//!   read as invalid (generational keys never alias). Misuse yields `None`
//!   or `false`, never a corrupted structure.
//! - A cursor must be used only with the container it was created from.
//!
//! Hashing
//! - The table never hashes. Callers derive keys with a [`KeyHasher`];
//!   [`fnv1a_64`] is provided.

pub mod config;
pub mod error;
pub mod fnv;
pub mod hash_table;
mod hash_table_proptest;
pub mod linked_list;
mod linked_list_proptest;
pub mod list_cursor;
pub mod table_cursor;

// Public surface
pub use config::TableConfig;
pub use error::Error;
pub use fnv::{fnv1a_64, BuildFnv1a, Fnv1aHasher, KeyHasher};
pub use hash_table::{HashTable, Key, KeyValue};
pub use linked_list::LinkedList;
pub use list_cursor::Cursor;
pub use table_cursor::TableCursor;
