#![cfg(test)]

// Property tests for ProbeMap kept inside the crate so they can reach
// internal details (capacity) without feature gates.

use crate::prime::is_prime;
use crate::probe_map::ProbeMap;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<S>(sut: &mut ProbeMap<String, i32, S>, pool: &[String], ops: Vec<OpI>)
where
    S: BuildHasher,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v);
                let mprev = model.insert(k, v);
                assert_eq!(prev, mprev, "insert must report the model's previous value");
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                assert_eq!(sut.remove(k.as_str()), model.remove(k));
                // Idempotence: a second remove is always a no-op.
                assert_eq!(sut.remove(k.as_str()), None);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                assert_eq!(sut.get(k.as_str()), model.get(k));
                assert_eq!(sut.contains_key(k.as_str()), model.contains_key(k));
            }
            OpI::Contains(s) => {
                assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Iterate => {
                let mut seen: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let mut expected: Vec<(String, i32)> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                seen.sort();
                expected.sort();
                assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        // 1) Size parity with the model; keys/values lengths match len.
        assert_eq!(sut.len(), model.len());
        assert_eq!(sut.is_empty(), model.is_empty());
        assert_eq!(sut.keys().count(), sut.len());
        assert_eq!(sut.values().count(), sut.len());
        // 2) Structural invariants: prime capacity, load factor bounded.
        assert!(is_prime(sut.capacity()));
        assert!(2 * sut.len() <= sut.capacity());
    }
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` returns the previous value exactly when the model does.
// - `get`/`contains_key`/`remove` agree with the model; removal is
//   idempotent.
// - `iter` yields each live entry exactly once.
// - Capacity stays prime and the load factor stays at or below 0.5.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ProbeMap<String, i32> = ProbeMap::new();
        run_scenario(&mut sut, &pool, ops);
    }
}

// Collision variant using a constant hasher: every key shares one probe
// path, so tombstone traversal and reuse are exercised constantly.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: the same state-machine invariants hold under worst-case
// collisions, where correctness rests entirely on the quadratic walk,
// tombstone bookkeeping, and the load-factor/prime-capacity coupling.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ProbeMap<String, i32, ConstBuildHasher> =
            ProbeMap::with_hasher(ConstBuildHasher);
        run_scenario(&mut sut, &pool, ops);
    }
}

// Property: a burst of inserts after a burst of removals never resurrects
// a removed key, regardless of how tombstones interleave on the shared
// probe path.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_removed_keys_stay_absent(
        removed in proptest::collection::btree_set("[a-m]{1,4}", 1..8),
        kept in proptest::collection::btree_set("[n-z]{1,4}", 1..16),
    ) {
        let mut sut: ProbeMap<String, i32, ConstBuildHasher> =
            ProbeMap::with_hasher(ConstBuildHasher);
        for (i, k) in removed.iter().enumerate() {
            sut.insert(k.clone(), i as i32);
        }
        for k in &removed {
            prop_assert!(sut.remove(k.as_str()).is_some());
        }
        for (i, k) in kept.iter().enumerate() {
            sut.insert(k.clone(), i as i32);
        }
        for k in &removed {
            prop_assert!(sut.get(k.as_str()).is_none());
            prop_assert!(!sut.contains_key(k.as_str()));
        }
        prop_assert_eq!(sut.len(), kept.len());
    }
}
