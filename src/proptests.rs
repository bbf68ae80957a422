use crate::bits::padded_bit;
use crate::counters::Counters;
use crate::trie::{Link, NodeId, PatriciaTrie};

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_trie<V>(t: &PatriciaTrie<V>) {
    if t.nodes.is_empty() {
        return;
    }

    let head = &t.nodes[0];
    assert_eq!(head.diff, 0, "head diff is nominally 0");

    // Every non-head node must be the target of exactly one child slot, every
    // child slot must lead to a strictly larger diff, and every leaf slot must
    // name a key whose bit at the slot's branching position picks that side.
    let mut parents = vec![0usize; t.nodes.len()];
    let mut stack: Vec<(Link, Option<(usize, u8)>)> = vec![(head.left, None)];
    let mut leaf_targets = 0usize;
    while let Some((link, above)) = stack.pop() {
        match link {
            Link::Leaf(NodeId(id)) => {
                assert!(id < t.nodes.len(), "leaf slot names a missing node");
                if let Some((d, side)) = above {
                    assert_eq!(padded_bit(&t.nodes[id].key, d), side, "leaf on the wrong side");
                }
                leaf_targets += 1;
            }
            Link::Child(NodeId(id)) => {
                assert_ne!(id, 0, "the head is never a child");
                parents[id] += 1;
                let node = &t.nodes[id];
                if let Some((d, _)) = above {
                    assert!(node.diff > d, "diff must increase: {} -> {}", d, node.diff);
                }
                assert!(
                    node.diff < node.key.len() * 8,
                    "a node branches inside its own terminated key"
                );
                stack.push((node.left, Some((node.diff, 0))));
                stack.push((node.right, Some((node.diff, 1))));
            }
        }
    }

    assert_eq!(parents[0], 0);
    for (id, &n) in parents.iter().enumerate().skip(1) {
        assert_eq!(n, 1, "node {id} must have exactly one parent");
    }
    assert_eq!(leaf_targets, t.len(), "one leaf slot per key");
}

#[derive(Clone, Debug)]
enum Op<V> {
    Insert(Vec<u8>, V),
    Get(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // Stored keys are NUL-terminated, so 0x00 never appears inside one.
    prop::collection::vec(1u8..=255, 1..=32)
}

fn text_key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet makes shared prefixes and prefix keys common.
    prop::collection::vec(prop::sample::select(b"abc ".to_vec()), 1..=6)
}

fn ops_strategy(key: impl Strategy<Value = Vec<u8>> + Clone) -> impl Strategy<Value = Vec<Op<u64>>> {
    let op = prop_oneof![
        60 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        40 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn run_ops(ops: Vec<Op<u64>>) -> Result<(), TestCaseError> {
    let mut t: PatriciaTrie<u64> = PatriciaTrie::new();
    let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let old_t = t.insert(&key, value).unwrap();
                let old_m = m.insert(key, value);
                prop_assert_eq!(old_t, old_m);
            }
            Op::Get(key) => {
                let got_t = t.get(&key).copied();
                let got_m = m.get(key.as_slice()).copied();
                prop_assert_eq!(got_t, got_m);
            }
        }

        prop_assert_eq!(t.len(), m.len());
    }

    validate_trie(&t);
    let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
    let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_bytes(ops in ops_strategy(key_strategy())) {
        run_ops(ops)?;
    }

    #[test]
    fn prop_equivalence_text(ops in ops_strategy(text_key_strategy())) {
        run_ops(ops)?;
    }

    #[test]
    fn prop_round_trip(keys in prop::collection::btree_set(key_strategy(), 0..200)) {
        let mut t: PatriciaTrie<usize> = PatriciaTrie::new();
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(t.insert(k, i).unwrap(), None);
        }
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(t.get(k), Some(&i));
        }
        prop_assert_eq!(t.len(), keys.len());
    }

    #[test]
    fn prop_traverse_complete(keys in prop::collection::vec(text_key_strategy(), 0..100)) {
        let mut t: PatriciaTrie<()> = PatriciaTrie::new();
        for k in &keys {
            t.insert(k, ()).unwrap();
        }

        let mut seen: Vec<Vec<u8>> = Vec::new();
        t.traverse(|k, _| seen.push(k.to_vec()));
        seen.sort();

        let mut expected = keys.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_miss_leaves_trie_unchanged(
        keys in prop::collection::btree_set(text_key_strategy(), 1..50),
        absent in text_key_strategy(),
    ) {
        prop_assume!(!keys.contains(&absent));

        let mut t: PatriciaTrie<u8> = PatriciaTrie::new();
        for k in &keys {
            t.insert(k, 1).unwrap();
        }
        let before: Vec<(usize, Link, Link)> =
            t.nodes.iter().map(|n| (n.diff, n.left, n.right)).collect();

        let mut c = Counters::new();
        prop_assert_eq!(t.search(&absent, &mut c).unwrap(), None);
        prop_assert_eq!(c.string_comparisons, 1);

        let after: Vec<(usize, Link, Link)> =
            t.nodes.iter().map(|n| (n.diff, n.left, n.right)).collect();
        prop_assert_eq!(before, after);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"b".to_vec(),
        b"c".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"ba".to_vec(),
        b"\xe0".to_vec(),
    ];

    for_each_permutation(&keys, |perm| {
        let mut t: PatriciaTrie<u64> = PatriciaTrie::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(t.insert(&k, v).unwrap(), m.insert(k, v));
        }

        validate_trie(&t);
        for (k, v) in &m {
            assert_eq!(t.get(k), Some(v));
        }
        let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn suburb_scenario() {
    let mut t: PatriciaTrie<u32> = PatriciaTrie::new();
    t.insert(b"Carlton", 1).unwrap();
    t.insert(b"Carlton North", 2).unwrap();
    t.insert(b"Parkville", 3).unwrap();
    validate_trie(&t);

    let mut c = Counters::new();
    assert_eq!(t.search(b"Carlton", &mut c).unwrap(), Some(&1));
    assert_eq!(t.search(b"Carlton North", &mut c).unwrap(), Some(&2));
    assert_eq!(t.search(b"Brunswick", &mut c).unwrap(), None);
    assert_eq!(c.string_comparisons, 3);
}
