//! Randomized properties: the tree must stay a valid red-black tree and
//! agree with `BTreeMap` across arbitrary insert/remove interleavings.

use std::collections::BTreeMap;

use copse_tree::TreeMap;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn matches_btreemap_and_stays_valid(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut map = TreeMap::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let newly = map.insert(k, v);
                    prop_assert_eq!(newly, model.insert(k, v).is_none());
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.check().is_ok(), "{:?}", map.check());
        }
        let got: Vec<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let want: Vec<(u8, u16)> = model.into_iter().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn inorder_is_sorted_for_any_insertion_order(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut map = TreeMap::new();
        for k in keys {
            map.insert(k, ());
        }
        let collected: Vec<i32> = map.keys().copied().collect();
        prop_assert!(collected.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(map.check().is_ok());
    }

    #[test]
    fn join_of_random_sets_accounts_for_overlap(
        a in prop::collection::btree_set(any::<u8>(), 0..60),
        b in prop::collection::btree_set(any::<u8>(), 0..60),
    ) {
        let mut dest = TreeMap::new();
        let mut src = TreeMap::new();
        for &k in &a {
            dest.insert(k, ());
        }
        for &k in &b {
            src.insert(k, ());
        }
        let unique_to_src = b.difference(&a).count();
        prop_assert_eq!(dest.join(&mut src), unique_to_src);
        prop_assert_eq!(dest.len(), a.union(&b).count());
        prop_assert!(src.is_empty());
        prop_assert!(dest.check().is_ok());
    }
}

#[test]
fn shuffled_bulk_insert_then_drain() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut keys: Vec<u32> = (0..1000).collect();
    keys.shuffle(&mut rng);

    let mut map = TreeMap::new();
    for &k in &keys {
        assert!(map.insert(k, k));
    }
    map.check().unwrap();
    assert_eq!(map.len(), 1000);

    keys.shuffle(&mut rng);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(map.remove(k), Some(*k));
        if i % 97 == 0 {
            map.check().unwrap();
        }
    }
    assert!(map.is_empty());
    map.check().unwrap();
}
