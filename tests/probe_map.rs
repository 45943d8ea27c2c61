// ProbeMap integration test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: insert then get returns the inserted value.
// - Absence: get/contains_key/remove agree that a missing key is
//   missing; absence is a None, never an error.
// - Tombstones: removal leaves probe sequences intact, removal is
//   idempotent, and removed keys are never resurrected.
// - Growth: capacity is always prime and the live-entry/capacity
//   ratio never exceeds 0.5 after an insert-triggered growth.
// - Rehash fidelity: every key keeps its most recently inserted value
//   across any number of growths.
use probemap::ProbeMap;

// Test: bulk round-trip through several growths.
// Assumes: growth doubles capacity (prime-rounded) as needed.
// Verifies: every key retrieves its latest value afterwards.
#[test]
fn bulk_insert_survives_growth() {
    let mut m: ProbeMap<String, u32> = ProbeMap::new();
    for i in 0..1_000u32 {
        assert_eq!(m.insert(format!("key-{i}"), i), None);
    }
    assert_eq!(m.len(), 1_000);
    for i in 0..1_000u32 {
        assert_eq!(m.get(format!("key-{i}").as_str()), Some(&i));
    }
    assert!(!m.contains_key("key-1000"));
}

// Test: overwrites before and after growth.
// Verifies: the most recently put value wins for every key, and
// overwrites never change len.
#[test]
fn latest_value_wins_across_rehashes() {
    let mut m: ProbeMap<u32, String> = ProbeMap::new();
    for i in 0..50 {
        m.insert(i, format!("first-{i}"));
    }
    for i in 0..50 {
        assert_eq!(m.insert(i, format!("second-{i}")), Some(format!("first-{i}")));
    }
    assert_eq!(m.len(), 50);
    for i in 0..50 {
        assert_eq!(m.get(&i), Some(&format!("second-{i}")));
    }
}

// Test: interleaved removals and inserts.
// Assumes: removal tombstones the slot rather than emptying it.
// Verifies: removed keys stay absent while surviving and later keys
// remain reachable; len counts live entries only.
#[test]
fn interleaved_remove_and_insert() {
    let mut m: ProbeMap<u32, u32> = ProbeMap::new();
    for i in 0..100 {
        m.insert(i, i);
    }
    for i in (0..100).step_by(2) {
        assert_eq!(m.remove(&i), Some(i));
    }
    for i in 100..150 {
        m.insert(i, i);
    }
    for i in (0..100).step_by(2) {
        assert_eq!(m.get(&i), None);
        assert_eq!(m.remove(&i), None, "second remove is a no-op");
    }
    for i in (1..100).step_by(2) {
        assert_eq!(m.get(&i), Some(&i));
    }
    for i in 100..150 {
        assert_eq!(m.get(&i), Some(&i));
    }
    assert_eq!(m.len(), 100);
}

// Test: remove a key right after insert, then add unrelated keys.
// Verifies: the tombstone is never misread as a live entry.
#[test]
fn fresh_tombstone_not_misread_as_live() {
    let mut m: ProbeMap<String, i32> = ProbeMap::new();
    m.insert("ghost".to_string(), 1);
    assert_eq!(m.remove("ghost"), Some(1));
    for k in ["alpha", "beta", "gamma", "delta", "epsilon"] {
        m.insert(k.to_string(), 0);
    }
    assert_eq!(m.get("ghost"), None);
    assert!(!m.contains_key("ghost"));
    assert_eq!(m.len(), 5);
}

// Test: keys()/values() correspondence on the public surface.
// Verifies: equal lengths (== len) and index-for-index pairing in
// slot order.
#[test]
fn keys_values_lengths_and_pairing() {
    let mut m: ProbeMap<u32, u32> = ProbeMap::new();
    for i in 0..60 {
        m.insert(i, i * 3);
    }
    for i in (0..60).step_by(3) {
        m.remove(&i);
    }
    let keys: Vec<u32> = m.keys().copied().collect();
    let values: Vec<u32> = m.values().copied().collect();
    assert_eq!(keys.len(), m.len());
    assert_eq!(values.len(), m.len());
    for (k, v) in keys.iter().zip(&values) {
        assert_eq!(*v, k * 3, "i-th key must pair with i-th value");
    }
}

// Test: capacity discipline visible through the public API.
// Verifies: capacity starts at 19, only grows, and growth lands on 41
// exactly when the 10th insert would push the load factor past 0.5.
#[test]
fn capacity_growth_boundary() {
    let mut m: ProbeMap<u32, u32> = ProbeMap::new();
    assert_eq!(m.capacity(), 19);
    for i in 0..9 {
        m.insert(i, i);
        assert_eq!(m.capacity(), 19);
    }
    m.insert(9, 9);
    assert_eq!(m.capacity(), 41);

    // Removals never shrink or otherwise change capacity.
    for i in 0..10 {
        m.remove(&i);
    }
    assert!(m.is_empty());
    assert_eq!(m.capacity(), 41);
}
