//! Property tests: the tree against `std::collections::BTreeMap`.
//!
//! Every generated operation is applied to both; after each one the tree
//! must pass `check_invariants` and agree with the model.

use std::collections::BTreeMap;

use interchange_bptree::BPlusTree;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32, u32),
    Remove(i32),
    Scan(i32, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A narrow key space forces duplicates and misses.
    prop_oneof![
        4 => (-200i32..200, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (-200i32..200).prop_map(Op::Remove),
        1 => (-220i32..220, -220i32..220).prop_map(|(a, b)| Op::Scan(a, b)),
    ]
}

fn assert_matches_model(tree: &BPlusTree<i32, u32>, model: &BTreeMap<i32, u32>) {
    let shape = tree.check_invariants().unwrap();
    assert_eq!(shape.len, model.len());
    let actual: Vec<(i32, u32)> = tree.iter().collect();
    let expected: Vec<(i32, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(actual, expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unique_inserts_scan_in_order(
        fanout in 3usize..12,
        keys in prop::collection::hash_set(any::<i32>(), 0..300),
    ) {
        let mut tree = BPlusTree::new(fanout).unwrap();
        let mut inserted = Vec::new();
        for &k in &keys {
            prop_assert!(tree.insert(k, k as u32));
            inserted.push(k);
            inserted.sort_unstable();

            tree.check_invariants().unwrap();
            let scanned: Vec<i32> = tree.keys().collect();
            prop_assert_eq!(&scanned, &inserted);
        }
    }

    #[test]
    fn prop_matches_btreemap(
        fanout in 3usize..9,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let mut tree = BPlusTree::new(fanout).unwrap();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let fresh = !model.contains_key(&k);
                    prop_assert_eq!(tree.insert(k, v), fresh);
                    model.entry(k).or_insert(v);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(tree.try_remove(&k).ok(), model.remove(&k));
                }
                Op::Scan(a, b) => {
                    let expected: Vec<u32> = if a < b {
                        model.range(a..b).map(|(_, &v)| v).collect()
                    } else {
                        Vec::new()
                    };
                    prop_assert_eq!(tree.range_scan(&a, &b), expected);
                }
            }
            assert_matches_model(&tree, &model);
        }

        for k in -200..200 {
            prop_assert_eq!(tree.get(&k), model.get(&k).copied());
        }
    }

    #[test]
    fn prop_insert_then_remove_all(
        fanout in 3usize..9,
        keys in prop::collection::vec(any::<i16>(), 0..250),
        seed in any::<u64>(),
    ) {
        let mut tree = BPlusTree::new(fanout).unwrap();
        let mut model = BTreeMap::new();
        for &k in &keys {
            tree.insert(k as i32, 0u32);
            model.insert(k as i32, 0u32);
        }
        assert_matches_model(&tree, &model);

        let mut order: Vec<i32> = model.keys().copied().collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        for k in order {
            prop_assert!(tree.remove(&k));
            prop_assert!(!tree.remove(&k));
            model.remove(&k);
            assert_matches_model(&tree, &model);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.node_count(), 0);
    }
}
