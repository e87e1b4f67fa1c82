// sprig-parser - Property-based tests for the persistent map
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for `PersistentMap` over `SprigVal` keys.
//!
//! Covers persistence of old versions, incremental size tracking and
//! agreement with a `std` model map.

use std::collections::HashMap;

use proptest::prelude::*;
use sprig_parser::{PersistentMap, SprigVal, TrieKey};

/// Keys drawn from a small space so that inserts and removals overlap.
fn key_strategy() -> impl Strategy<Value = SprigVal> {
    prop_oneof![
        (0..40i32).prop_map(SprigVal::from),
        "[a-e]{1,2}".prop_map(|s| SprigVal::keyword(&s)),
        "[a-e]{1,2}".prop_map(SprigVal::from),
        prop::collection::vec(0..3i32, 0..3)
            .prop_map(|xs| SprigVal::vector(xs.into_iter().map(SprigVal::from))),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Assoc(SprigVal, i32),
    Without(SprigVal),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key_strategy(), any::<i32>()).prop_map(|(k, v)| Op::Assoc(k, v)),
        1 => key_strategy().prop_map(Op::Without),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying a sequence of updates agrees with a model map.
    #[test]
    fn matches_model(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut map: PersistentMap<SprigVal, SprigVal> = PersistentMap::new();
        let mut model: HashMap<String, (SprigVal, i32)> = HashMap::new();

        for op in ops {
            match op {
                Op::Assoc(k, v) => {
                    map = map.assoc(k.clone(), SprigVal::from(v));
                    model.insert(k.to_string(), (k, v));
                }
                Op::Without(k) => {
                    map = map.without(&k);
                    model.remove(&k.to_string());
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(map.iter().count(), model.len());
        for (k, v) in model.values() {
            prop_assert_eq!(map.get(k), Some(&SprigVal::from(*v)));
        }
    }

    /// Old versions are unaffected by later updates.
    #[test]
    fn assoc_is_persistent(
        entries in prop::collection::vec((key_strategy(), any::<i32>()), 0..40),
        key in key_strategy(),
        value in any::<i32>(),
    ) {
        let before: PersistentMap<SprigVal, SprigVal> = entries
            .into_iter()
            .map(|(k, v)| (k, SprigVal::from(v)))
            .collect();
        let old_value = before.get(&key).cloned();
        let after = before.assoc(key.clone(), SprigVal::from(value));

        prop_assert_eq!(before.get(&key).cloned(), old_value.clone());
        prop_assert_eq!(after.get(&key), Some(&SprigVal::from(value)));

        let expected = if old_value.is_some() { before.len() } else { before.len() + 1 };
        prop_assert_eq!(after.len(), expected);
    }

    /// Removing changes the size only when the key was present.
    #[test]
    fn without_size(
        entries in prop::collection::vec((key_strategy(), any::<i32>()), 0..40),
        key in key_strategy(),
    ) {
        let map: PersistentMap<SprigVal, SprigVal> = entries
            .into_iter()
            .map(|(k, v)| (k, SprigVal::from(v)))
            .collect();
        let removed = map.without(&key);
        let expected = if map.contains_key(&key) { map.len() - 1 } else { map.len() };
        prop_assert_eq!(removed.len(), expected);
        prop_assert!(!removed.contains_key(&key));
    }

    /// Equal keys built separately find the same entry.
    #[test]
    fn equal_keys_share_entries(xs in prop::collection::vec(-5..5i32, 0..4)) {
        let as_vector = SprigVal::vector(xs.iter().copied().map(SprigVal::from));
        let as_list = SprigVal::list(xs.iter().copied().map(SprigVal::from));
        prop_assert_eq!(as_vector.trie_hash(), as_list.trie_hash());

        let map = PersistentMap::new().assoc(as_vector, SprigVal::from(1));
        prop_assert_eq!(map.get(&as_list), Some(&SprigVal::from(1)));
    }
}
