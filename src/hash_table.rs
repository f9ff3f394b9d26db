//! HashTable: separate chaining over `LinkedList` buckets with in-place growth.
//!
//! The table is an outer handle around a swappable `Buckets` block. Growth
//! builds a replacement table, moves every pair into it through a
//! [`TableCursor`], then swaps the two blocks, so a caller holding
//! `&mut HashTable` keeps the same table with more buckets.

use crate::config::TableConfig;
use crate::error::Error;
use crate::linked_list::{self, LinkedList};
use crate::list_cursor::Cursor;
use crate::table_cursor::TableCursor;
use core::fmt;

pub type Key = u64;

/// A key and the value stored under it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyValue<V> {
    pub key: Key,
    pub value: V,
}

impl<V> KeyValue<V> {
    pub fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_parts(self) -> (Key, V) {
        (self.key, self.value)
    }
}

pub(crate) type Chain<V> = LinkedList<KeyValue<V>>;

// Internal state block; swapped wholesale on growth.
struct Buckets<V> {
    chains: Vec<Chain<V>>,
    len: usize,
}

impl<V> Buckets<V> {
    fn allocate(count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::ZeroBuckets);
        }
        let mut chains = Vec::new();
        chains
            .try_reserve_exact(count)
            .map_err(|_| Error::Allocation(count))?;
        chains.resize_with(count, LinkedList::new);
        Ok(Self { chains, len: 0 })
    }
}

pub struct HashTable<V> {
    state: Buckets<V>,
    config: TableConfig,
    resizes: u64,
}

impl<V> HashTable<V> {
    /// Table with the default policy.
    pub fn new() -> Self {
        match Self::with_config(TableConfig::default()) {
            Ok(table) => table,
            Err(e) => unreachable!("default table config must allocate: {e}"),
        }
    }

    /// Table with `buckets` initial buckets and the default growth policy.
    pub fn with_buckets(buckets: usize) -> Result<Self, Error> {
        Self::with_config(TableConfig::new(buckets))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            state: Buckets::allocate(config.initial_buckets)?,
            config,
            resizes: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.state.len
    }

    pub fn is_empty(&self) -> bool {
        self.state.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.state.chains.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Number of growth steps taken since construction.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Bucket that `key` maps to: `key mod bucket_count`.
    pub fn bucket_index(&self, key: Key) -> usize {
        (key % self.bucket_count() as u64) as usize
    }

    /// Insert `value` under `key`, growing first if the table is at its
    /// load threshold.
    ///
    /// If `key` was already present its pair is unlinked and returned to
    /// the caller, who now owns the old value; the new pair goes to the
    /// end of the chain and the element count is unchanged. Growth is
    /// best-effort: if it fails the pair is still inserted.
    pub fn insert(&mut self, key: Key, value: V) -> Option<KeyValue<V>> {
        if let Err(_growth) = self.maybe_resize() {
            // A failed growth leaves the table correct, only more loaded.
        }
        self.insert_in_place(KeyValue { key, value })
    }

    /// Like [`insert`](Self::insert), but a failed growth step is returned
    /// and nothing is inserted.
    pub fn try_insert(&mut self, key: Key, value: V) -> Result<Option<KeyValue<V>>, Error> {
        self.maybe_resize()?;
        Ok(self.insert_in_place(KeyValue { key, value }))
    }

    fn insert_in_place(&mut self, pair: KeyValue<V>) -> Option<KeyValue<V>> {
        let bucket = self.bucket_index(pair.key);
        let chain = &mut self.state.chains[bucket];
        let displaced = seek(chain, pair.key).and_then(|mut c| c.take(chain));
        chain.append(pair);
        if displaced.is_none() {
            self.state.len += 1;
        }
        displaced
    }

    pub fn find(&self, key: Key) -> Option<&V> {
        self.get_key_value(key).map(|kv| &kv.value)
    }

    pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        let chain = &mut self.state.chains[bucket];
        let cursor = seek(chain, key)?;
        cursor.get_mut(chain).map(|kv| &mut kv.value)
    }

    pub fn get_key_value(&self, key: Key) -> Option<&KeyValue<V>> {
        let chain = &self.state.chains[self.bucket_index(key)];
        seek(chain, key).and_then(|c| c.get(chain))
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Unlink the pair stored under `key` and hand it to the caller.
    pub fn remove(&mut self, key: Key) -> Option<KeyValue<V>> {
        let bucket = self.bucket_index(key);
        let chain = &mut self.state.chains[bucket];
        let removed = seek(chain, key)?.take(chain)?;
        self.state.len -= 1;
        Some(removed)
    }

    /// Release every value through `release`, bucket by bucket, then the
    /// table itself.
    pub fn free<F>(self, mut release: F)
    where
        F: FnMut(V),
    {
        for chain in self.state.chains {
            chain.free(|kv| release(kv.value));
        }
    }

    /// Cursor at the first pair; see [`TableCursor`].
    pub fn cursor(&self) -> TableCursor {
        TableCursor::new(self)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            chains: self.state.chains.iter(),
            current: None,
            remaining: self.len(),
        }
    }

    pub(crate) fn chains(&self) -> &[Chain<V>] {
        &self.state.chains
    }

    pub(crate) fn generation(&self) -> u64 {
        self.resizes
    }

    /// First non-empty bucket at or after `from`.
    pub(crate) fn next_occupied(&self, from: usize) -> Option<usize> {
        self.state
            .chains
            .get(from..)?
            .iter()
            .position(|c| !c.is_empty())
            .map(|i| from + i)
    }

    /// Grow once the table holds `max_load_factor * bucket_count` pairs.
    fn maybe_resize(&mut self) -> Result<(), Error> {
        let buckets = self.bucket_count();
        if self.state.len < self.config.grow_threshold(buckets) {
            return Ok(());
        }

        let grown = self.config.grown_buckets(buckets)?;
        let mut replacement = HashTable {
            state: Buckets::allocate(grown)?,
            config: self.config,
            resizes: 0,
        };

        let mut cursor = TableCursor::new(self);
        while let Some(pair) = cursor.remove(self) {
            let displaced = replacement.insert(pair.key, pair.value);
            debug_assert!(displaced.is_none(), "keys are unique across the table");
        }
        debug_assert!(self.is_empty());

        core::mem::swap(&mut self.state, &mut replacement.state);
        self.resizes += 1;
        // `replacement` now holds only the drained chains of the old block.
        Ok(())
    }

    /// Check chain membership, per-chain key uniqueness and the element
    /// count; panics on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut total = 0;
        for (i, chain) in self.state.chains.iter().enumerate() {
            chain.assert_consistent();
            let mut keys = std::collections::HashSet::new();
            for kv in chain {
                assert_eq!(self.bucket_index(kv.key), i, "pair in wrong bucket");
                assert!(keys.insert(kv.key), "duplicate key {} in chain", kv.key);
            }
            total += chain.len();
        }
        assert_eq!(total, self.len(), "element count disagrees with chains");
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|kv| (kv.key, &kv.value)))
            .finish()
    }
}

/// Cursor at the pair stored under `key` in `chain`, scanning from the head.
fn seek<V>(chain: &Chain<V>, key: Key) -> Option<Cursor> {
    let mut cursor = chain.cursor();
    while let Some(kv) = cursor.get(chain) {
        if kv.key == key {
            return Some(cursor);
        }
        cursor.advance(chain);
    }
    None
}

/// Iterator over every pair, bucket by bucket.
pub struct Iter<'a, V> {
    chains: core::slice::Iter<'a, Chain<V>>,
    current: Option<linked_list::Iter<'a, KeyValue<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a KeyValue<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(kv) = self.current.as_mut().and_then(|it| it.next()) {
                self.remaining -= 1;
                return Some(kv);
            }
            self.current = Some(self.chains.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a KeyValue<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    /// Invariant: bucket index is `key mod bucket_count`.
    #[test]
    fn bucket_index_is_key_mod_buckets() {
        let t: HashTable<()> = HashTable::with_buckets(7).unwrap();
        assert_eq!(t.bucket_index(0), 0);
        assert_eq!(t.bucket_index(13), 6);
        assert_eq!(t.bucket_index(u64::MAX), (u64::MAX % 7) as usize);
    }

    #[test]
    fn zero_buckets_rejected() {
        assert!(matches!(
            HashTable::<i32>::with_buckets(0),
            Err(Error::ZeroBuckets)
        ));
    }

    /// Invariant: replacing a key hands back the old pair, keeps the count,
    /// and moves the new pair to the end of its chain.
    #[test]
    fn replace_appends_fresh_node() {
        let mut t = HashTable::with_buckets(1).unwrap();
        t.insert(1, "a");
        t.insert(2, "b");
        let old = t.insert(1, "c");
        assert_eq!(old, Some(KeyValue::new(1, "a")));
        assert_eq!(t.len(), 2);
        let order: Vec<_> = t.chains()[0].iter().map(|kv| kv.key).collect();
        assert_eq!(order, vec![2, 1]);
        t.assert_consistent();
    }

    #[test]
    fn find_mut_and_contains() {
        let mut t = HashTable::with_buckets(4).unwrap();
        t.insert(5, 10);
        *t.find_mut(5).unwrap() += 1;
        assert_eq!(t.find(5), Some(&11));
        assert!(t.contains_key(5));
        assert!(!t.contains_key(1));
        assert_eq!(t.find_mut(1), None);
        assert_eq!(t.get_key_value(5), Some(&KeyValue::new(5, 11)));
    }

    /// Invariant: growth triggers at `load_factor * buckets` elements,
    /// before the insert, and keeps every pair reachable.
    #[test]
    fn growth_threshold_and_factor() {
        let mut t = HashTable::with_buckets(2).unwrap();
        for k in 0..6u64 {
            t.insert(k, k * 100);
        }
        assert_eq!(t.bucket_count(), 2);
        assert_eq!(t.resize_count(), 0);

        t.insert(6, 600);
        assert_eq!(t.bucket_count(), 18);
        assert_eq!(t.resize_count(), 1);
        assert_eq!(t.len(), 7);
        for k in 0..7u64 {
            assert_eq!(t.find(k), Some(&(k * 100)));
        }
        t.assert_consistent();
    }

    /// Invariant: a replace at the threshold still grows first but does not
    /// change the element count.
    #[test]
    fn replace_at_threshold_grows_without_counting() {
        let mut t = HashTable::with_buckets(1).unwrap();
        for k in 0..3u64 {
            t.insert(k, k);
        }
        assert_eq!(t.insert(0, 42), Some(KeyValue::new(0, 0)));
        assert_eq!(t.bucket_count(), 9);
        assert_eq!(t.len(), 3);
        t.assert_consistent();
    }

    #[test]
    fn custom_policy_controls_growth() {
        let cfg = TableConfig::new(4)
            .with_max_load_factor(1)
            .with_growth_factor(2);
        let mut t = HashTable::with_config(cfg).unwrap();
        for k in 0..5u64 {
            t.insert(k, ());
        }
        assert_eq!(t.bucket_count(), 8);
        assert_eq!(t.config(), &cfg);
    }

    /// Invariant: a growth step that cannot compute its bucket count is
    /// reported by `try_insert` and tolerated by `insert`.
    #[test]
    fn growth_overflow_is_reported_or_tolerated() {
        let cfg = TableConfig::new(2)
            .with_max_load_factor(1)
            .with_growth_factor(usize::MAX);
        let mut t = HashTable::with_config(cfg).unwrap();
        assert_eq!(t.try_insert(0, 'a'), Ok(None));
        t.insert(1, 'b');
        assert_eq!(t.try_insert(2, 'c'), Err(Error::CapacityOverflow(2)));
        assert_eq!(t.len(), 2);
        assert_eq!(t.insert(2, 'c'), None);
        assert_eq!(t.len(), 3);
        assert_eq!(t.bucket_count(), 2);
        t.assert_consistent();
    }

    #[test]
    fn bucket_array_allocation_failure_is_reported() {
        assert_eq!(
            HashTable::<u8>::with_buckets(usize::MAX).err(),
            Some(Error::Allocation(usize::MAX))
        );
    }

    #[test]
    fn failed_growth_allocation_keeps_table_usable() {
        let cfg = TableConfig::new(1)
            .with_max_load_factor(1)
            .with_growth_factor(usize::MAX / 2);
        let mut t = HashTable::with_config(cfg).unwrap();
        assert_eq!(t.insert(0, 0u32), None);
        assert_eq!(t.try_insert(1, 1), Err(Error::Allocation(usize::MAX / 2)));
        assert_eq!(t.len(), 1);
        assert_eq!(t.find(1), None);

        assert_eq!(t.insert(1, 1), None);
        assert_eq!(t.len(), 2);
        assert_eq!(t.bucket_count(), 1);
        assert_eq!(t.resize_count(), 0);
        assert_eq!(t.find(1), Some(&1));
        t.assert_consistent();
    }

    #[test]
    fn default_table_uses_default_config() {
        let t: HashTable<u8> = HashTable::new();
        assert_eq!(t.bucket_count(), TableConfig::DEFAULT_BUCKETS);
        assert_eq!(t.config(), &TableConfig::default());
        assert!(t.is_empty());
    }

    #[test]
    fn free_releases_every_value() {
        let mut t = HashTable::with_buckets(3).unwrap();
        for k in 0..20u64 {
            t.insert(k, k);
        }
        let released = RefCell::new(BTreeSet::new());
        t.free(|v| {
            released.borrow_mut().insert(v);
        });
        assert_eq!(released.into_inner(), (0..20).collect());
    }

    #[test]
    fn iter_visits_buckets_in_order() {
        let mut t = HashTable::with_buckets(4).unwrap();
        for k in [3u64, 1, 0, 2] {
            t.insert(k, ());
        }
        let it = t.iter();
        assert_eq!(it.len(), 4);
        let keys: Vec<_> = it.map(|kv| kv.key).collect();
        assert_eq!(keys, vec![0, 1, 2, 3]);
    }

    #[test]
    fn debug_renders_as_map() {
        let mut t = HashTable::with_buckets(2).unwrap();
        t.insert(1, "x");
        assert_eq!(format!("{:?}", t), r#"{1: "x"}"#);
    }
}
