//! probemap: a single-threaded open-addressing hash map with quadratic
//! probing, lazy (tombstone) deletion, and automatic growth to prime
//! capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the collision-resolution machinery small and auditable,
//!   with the slot state machine visible in the code rather than hidden
//!   in mutator methods.
//! - Layers:
//!   - `Slot<K, V>`: one cell of the backing array, an explicit
//!     three-state enum (empty / occupied / tombstone) with named
//!     transition methods.
//!   - `prime`: trial-division primality and next-prime selection; the
//!     table capacity is always prime.
//!   - `ProbeMap<K, V, S>`: public API. Owns the slot array and the
//!     live-entry count; probing, load-factor growth, and rehash all
//!     live here.
//!
//! Constraints
//! - Single-threaded: no internal synchronization; every operation is
//!   synchronous and runs to completion.
//! - Capacity is always prime, and the live-entry/capacity ratio is
//!   kept at or below 0.5 by growing before an insert would exceed it.
//!   Together these bound the quadratic probe walk: with load factor
//!   at most 0.5, a probe for an absent key reaches an empty slot
//!   before the sequence wraps.
//! - Tombstones keep probe sequences intact after removal. A slot only
//!   returns to empty when the whole table is rebuilt by a rehash.
//! - Callers never see slots, only keys and values through the
//!   documented operations.
//!
//! Why the explicit slot enum?
//! - Localize invariants: each transition (`Empty -> Occupied`,
//!   `Occupied -> Tombstone`, `Tombstone -> Occupied` on reuse) is a
//!   named method, so the per-slot state machine can be audited in one
//!   file.
//! - No casts: the backing storage is a homogeneously-typed
//!   `Vec<Slot<K, V>>`; there is no untyped array and no runtime type
//!   assumption.
//!
//! Invariant checking
//! - Structural invariants (occupied-slot count equals `len`, rehash
//!   copies exactly `len` entries) are debug-only assertions. They
//!   protect against implementation bugs, not user input, and compile
//!   out in release builds.
//!
//! Notes and non-goals
//! - Absence is not an error: `get`/`remove` on a missing key return
//!   `None`, never a failure.
//! - No iteration-order guarantee beyond slot order; `keys()` and
//!   `values()` correspond index-for-index.
//! - No shrinking and no tombstone-compaction policy; growth always
//!   requests twice the current capacity, rounded up to a prime.
//! - Hashing and equality come from the key type (`Hash` + `Eq`); the
//!   map defines neither.
//!
//! Inherited risk
//! - The quadratic increment sequence (1, 3, 5, ...) only visits every
//!   residue mod a prime under number-theoretic conditions this crate
//!   does not check; it relies on the 0.5 load-factor discipline
//!   instead, as the design it follows does.

mod prime;
mod probe_map;
mod probe_map_proptest;
mod slot;

// Public surface
pub use probe_map::{Iter, Keys, ProbeMap, Values};
