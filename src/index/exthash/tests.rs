use super::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn scenario_keys_retrievable() {
    let mut table = ExtHash::with_buckets(2).unwrap();
    let keys: Vec<i32> = (1..=16).filter(|k| ![8, 10, 13, 14].contains(k)).collect();
    for k in &keys {
        table.put(*k, *k * 10).unwrap();
    }
    for k in &keys {
        assert_eq!(table.get(k), Some(&(k * 10)));
    }
    for absent in [8, 10, 13, 14, 0, 17] {
        assert_eq!(table.get(&absent), None);
    }
    assert_eq!(table.len(), 12);
    assert_eq!(table.size(), 4 * table.bucket_count());
    table.check_invariants().unwrap();
}

#[test]
fn fresh_table_layout() {
    let table = ExtHash::<i32, i32>::with_buckets(8).unwrap();
    assert_eq!(table.global_depth(), 3);
    assert_eq!(table.bucket_count(), 8);
    assert_eq!(table.size(), 32);
    assert!(table.is_empty());
    table.check_invariants().unwrap();
}

#[test]
fn bucket_count_must_be_power_of_two() {
    for n in [0, 3, 6, 12] {
        assert_eq!(
            ExtHash::<i32, i32>::with_buckets(n).unwrap_err().kind(),
            Kind::WrongConfig
        );
    }
    assert_eq!(
        ExtHash::<i32, i32>::with_params(4, 0, 24).unwrap_err().kind(),
        Kind::WrongConfig
    );
    assert_eq!(
        ExtHash::<i32, i32>::with_params(8, 4, 2).unwrap_err().kind(),
        Kind::WrongConfig
    );
}

#[test]
fn many_inserts_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut table = ExtHash::new();
    let mut reference = BTreeMap::new();
    for i in 0..5000 {
        let key: u64 = rng.gen();
        table.insert(key, i).unwrap();
        reference.insert(key, i);
        if i % 997 == 0 {
            table.check_invariants().unwrap();
        }
    }
    table.check_invariants().unwrap();
    assert_eq!(table.len(), reference.len());
    for (k, v) in &reference {
        assert_eq!(table.get(k), Some(v));
    }
    assert!(table.global_depth() > 1);
    assert_eq!(table.size(), table.slots_per_bucket() * table.bucket_count());
}

#[test]
fn duplicates_append() {
    let mut table = ExtHash::new();
    table.insert("Rocky", 1).unwrap();
    table.insert("Rocky", 2).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&"Rocky"), Some(&1));
    let values: Vec<_> = table
        .entries()
        .into_iter()
        .filter(|(k, _)| **k == "Rocky")
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn duplicates_survive_splits_in_order() {
    let mut table = ExtHash::with_params(1, 2, 24).unwrap();
    table.insert(7, 'a').unwrap();
    table.insert(7, 'b').unwrap();
    for k in 100..140 {
        table.insert(k, 'x').unwrap();
    }
    table.check_invariants().unwrap();
    assert_eq!(table.get(&7), Some(&'a'));
    assert_eq!(table.len(), 42);
}

#[test]
fn identical_hashes_overflow() {
    let mut table = ExtHash::new();
    for i in 0..4 {
        table.insert(13, i).unwrap();
    }
    let err = table.insert(13, 4).unwrap_err();
    assert_eq!(err.kind(), Kind::BucketOverflow);
    assert_eq!(table.len(), 4);
    table.check_invariants().unwrap();
    table.insert(14, 0).unwrap();
    assert_eq!(table.get(&14), Some(&0));
}

#[test]
fn depth_limit_overflow() {
    let mut table = ExtHash::with_params(1, 1, 0).unwrap();
    table.insert(1, 1).unwrap();
    assert_eq!(table.insert(2, 2).unwrap_err().kind(), Kind::BucketOverflow);
    assert_eq!(table.global_depth(), 0);
    table.check_invariants().unwrap();
}
