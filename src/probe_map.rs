//! ProbeMap: open-addressing table with quadratic probing and tombstones.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

use crate::prime::{is_prime, next_prime};
use crate::slot::Slot;

/// Capacity used by `new()`; already prime.
const DEFAULT_CAPACITY: usize = 19;

/// Growth threshold. An insert of a brand-new key grows the table first
/// whenever the live-entry count it would produce exceeds this fraction
/// of capacity. Coupled with prime capacity: at or below 0.5 a quadratic
/// probe for an absent key reaches an empty slot before wrapping.
const LOAD_FACTOR: f64 = 0.5;

/// Where a probe walk ended.
enum Probe {
    /// Live entry with an equal key at this index.
    Found(usize),
    /// Walk ended on an empty slot and saw no tombstone on the way.
    Empty(usize),
    /// No live match; this is the first tombstone seen on the walk,
    /// preferred over the terminating empty slot so the entry lands
    /// earlier on its own probe sequence.
    Tombstone(usize),
}

/// A hash map using open addressing with quadratic probing, lazy
/// (tombstone) deletion, and automatic growth to prime capacities.
///
/// Absent keys are reported as `None`, never as an error. Strictly
/// single-threaded; operations run to completion and never suspend.
pub struct ProbeMap<K, V, S = RandomState> {
    hasher: S,
    slots: Vec<Slot<K, V>>,
    // Count of live (occupied) slots only; tombstones are not counted.
    len: usize,
}

impl<K, V> ProbeMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map with the default prime capacity (19).
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, Default::default())
    }

    /// Creates an empty map whose capacity is the smallest prime at or
    /// above `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V> Default for ProbeMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            slots: fresh_table(next_prime(capacity)),
            len: 0,
        }
    }

    /// Number of live entries. Tombstones do not count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current table capacity; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raw hash reduced to a slot index in `[0, capacity)`. Hashes are
    /// unsigned here, so reduction is a plain modulo.
    fn hash_index<Q>(&self, key: &Q, capacity: usize) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % capacity as u64) as usize
    }

    /// Quadratic probe walk over `slots` starting at `start`: offsets
    /// grow by 1, 3, 5, ... so step i lands on `start + i²` mod
    /// capacity. Stops on an empty slot or a live entry whose key
    /// equals `key`; tombstones and non-matching live entries are
    /// walked past, remembering the first tombstone for reuse.
    ///
    /// Takes the slot slice as an argument so a rehash can probe the
    /// new table while draining the old one. Termination relies on the
    /// load-factor discipline leaving empty slots in every table.
    fn probe<Q>(slots: &[Slot<K, V>], start: usize, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let capacity = slots.len();
        let mut index = start;
        let mut inc = 1;
        let mut first_tombstone = None;
        loop {
            match &slots[index] {
                Slot::Empty => {
                    return match first_tombstone {
                        Some(t) => Probe::Tombstone(t),
                        None => Probe::Empty(index),
                    };
                }
                Slot::Occupied { key: k, .. } if k.borrow() == key => {
                    return Probe::Found(index);
                }
                Slot::Occupied { .. } => {}
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
            }
            index = (index + inc) % capacity;
            inc += 2;
        }
    }

    /// Returns a reference to the value stored for `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let start = self.hash_index(key, self.slots.len());
        match Self::probe(&self.slots, start, key) {
            Probe::Found(i) => self.slots[i].value(),
            Probe::Empty(_) | Probe::Tombstone(_) => None,
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let start = self.hash_index(key, self.slots.len());
        matches!(Self::probe(&self.slots, start, key), Probe::Found(_))
    }

    /// Inserts `key -> value`, returning the previous value if the key
    /// was live. A reused tombstone never yields a previous value; the
    /// mapping it once held was already removed.
    ///
    /// A brand-new key landing on an empty slot grows the table first
    /// when the insert would push the load factor above 0.5, then
    /// re-probes (the pre-growth landing index is meaningless in the
    /// new table).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let start = self.hash_index(&key, self.slots.len());
        match Self::probe(&self.slots, start, &key) {
            Probe::Found(i) => Some(self.slots[i].replace_value(value)),
            Probe::Tombstone(i) => {
                self.slots[i].occupy(key, value);
                self.len += 1;
                self.debug_check_live_count();
                None
            }
            Probe::Empty(i) => {
                let mut index = i;
                if (self.len + 1) as f64 / self.slots.len() as f64 > LOAD_FACTOR {
                    self.rehash(self.slots.len() * 2);
                    let start = self.hash_index(&key, self.slots.len());
                    index = match Self::probe(&self.slots, start, &key) {
                        Probe::Empty(i) | Probe::Tombstone(i) => i,
                        Probe::Found(_) => unreachable!("absent key found after rehash"),
                    };
                }
                self.slots[index].occupy(key, value);
                self.len += 1;
                self.debug_check_live_count();
                None
            }
        }
    }

    /// Removes `key`, returning its value if it was live. The slot
    /// becomes a tombstone so later probe walks continue past it.
    /// Removing an absent or already-removed key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let start = self.hash_index(key, self.slots.len());
        match Self::probe(&self.slots, start, key) {
            Probe::Found(i) => {
                let value = self.slots[i].retire();
                debug_assert!(value.is_some(), "probe found a non-live slot");
                self.len -= 1;
                self.debug_check_live_count();
                value
            }
            Probe::Empty(_) | Probe::Tombstone(_) => None,
        }
    }

    /// Rebuilds the table at the smallest prime at or above
    /// `requested`, re-probing every live entry into the fresh table
    /// directly. Tombstones are discarded wholesale; no slot survives.
    /// Entries bypass `insert`, so no load-factor check recurses here.
    fn rehash(&mut self, requested: usize) {
        let new_capacity = next_prime(requested);
        let old = core::mem::replace(&mut self.slots, fresh_table(new_capacity));
        let mut copied = 0;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                let start = self.hash_index(&key, new_capacity);
                match Self::probe(&self.slots, start, &key) {
                    Probe::Empty(i) | Probe::Tombstone(i) => self.slots[i].occupy(key, value),
                    Probe::Found(_) => unreachable!("duplicate key during rehash"),
                }
                copied += 1;
            }
        }
        debug_assert_eq!(copied, self.len, "rehash must copy every live entry");
        debug_assert!(is_prime(self.slots.len()));
    }

    /// Iterates live entries in slot order (not insertion order).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Live keys in slot order. Pairs index-for-index with `values()`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Live values in slot order. Pairs index-for-index with `keys()`.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    // Debug-only sweep: the number of occupied slots must equal `len`.
    // A divergence is a bug in this module, never a caller error.
    fn debug_check_live_count(&self) {
        debug_assert_eq!(
            self.slots.iter().filter(|s| s.is_occupied()).count(),
            self.len,
            "live-slot count diverged from len"
        );
    }
}

fn fresh_table<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// Iterator over live `(key, value)` pairs in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value } = slot {
                return Some((key, value));
            }
        }
        None
    }
}

/// Iterator over live keys in slot order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// Iterator over live values in slot order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}
