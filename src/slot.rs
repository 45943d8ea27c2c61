//! Slot: one cell of the backing array, with explicit state transitions.
//!
//! A slot is `Empty` until first occupied, `Occupied` while it holds a
//! live mapping, and `Tombstone` after removal. Tombstones never stop a
//! probe walk; a live entry for another key may lie further along the
//! same sequence. A tombstone may be re-occupied by a later insert,
//! possibly under a different key. Nothing here turns a slot back to
//! `Empty`; only a full-table rehash discards tombstones.

#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied { key: K, value: V },
    Tombstone,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// Value of a live slot; `None` for empty and tombstoned slots.
    pub(crate) fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// `Empty -> Occupied` or `Tombstone -> Occupied` (reuse, possibly
    /// under a different key). Must not be called on a live slot; an
    /// overwrite of a live entry goes through `replace_value` so the
    /// previous value is surfaced.
    pub(crate) fn occupy(&mut self, key: K, value: V) {
        debug_assert!(!self.is_occupied(), "occupy() called on a live slot");
        *self = Slot::Occupied { key, value };
    }

    /// Overwrite the value of a live slot in place, returning the old
    /// value. The key stays as stored (it compared equal to the probe
    /// key).
    pub(crate) fn replace_value(&mut self, new: V) -> V {
        match self {
            Slot::Occupied { value, .. } => core::mem::replace(value, new),
            _ => unreachable!("replace_value() called on a non-live slot"),
        }
    }

    /// `Occupied -> Tombstone`, dropping the key and handing back the
    /// value. Returns `None` when the slot holds no live entry, which
    /// makes removal idempotent.
    pub(crate) fn retire(&mut self) -> Option<V> {
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied { value, .. } => Some(value),
            // Not live: put the original state back so an Empty slot
            // keeps terminating probe walks.
            other => {
                *self = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;

    #[test]
    fn occupy_then_retire_yields_value() {
        let mut s: Slot<&str, i32> = Slot::Empty;
        s.occupy("k", 7);
        assert!(s.is_occupied());
        assert_eq!(s.retire(), Some(7));
        assert!(!s.is_occupied());
    }

    #[test]
    fn retire_is_idempotent_and_preserves_empty() {
        let mut empty: Slot<&str, i32> = Slot::Empty;
        assert_eq!(empty.retire(), None);
        assert!(matches!(empty, Slot::Empty), "Empty must stay Empty");

        let mut s: Slot<&str, i32> = Slot::Empty;
        s.occupy("k", 1);
        assert_eq!(s.retire(), Some(1));
        assert_eq!(s.retire(), None);
        assert!(matches!(s, Slot::Tombstone));
    }

    #[test]
    fn tombstone_reuse_may_change_key() {
        let mut s: Slot<String, i32> = Slot::Empty;
        s.occupy("old".to_string(), 1);
        let _ = s.retire();
        s.occupy("new".to_string(), 2);
        match &s {
            Slot::Occupied { key, value } => {
                assert_eq!(key, "new");
                assert_eq!(*value, 2);
            }
            _ => panic!("expected reused slot to be live"),
        }
    }

    #[test]
    fn replace_value_returns_previous() {
        let mut s: Slot<&str, i32> = Slot::Empty;
        s.occupy("k", 1);
        assert_eq!(s.replace_value(2), 1);
        assert_eq!(s.retire(), Some(2));
    }
}
