// ==============================================
// MAP OPERATION LAWS (integration)
// ==============================================
//
// End-to-end checks of the dictionary surface: insert/get/remove round
// trips, ordered iteration, and the read paths that must not reshape the
// tree. These exercise the public API only and belong here rather than in
// any single source file.

use splaycache::tree::SplayMap;

/// Deterministic shuffle of 0..n via a multiplicative permutation.
fn shuffled_keys(n: u64) -> impl Iterator<Item = u64> {
    // 99991 is coprime with every n used in these tests
    (0..n).map(move |i| (i * 99991 + 17) % n)
}

// ==============================================
// Seed scenario: a thousand integers
// ==============================================

#[test]
fn thousand_integers_roundtrip() {
    let mut map = SplayMap::new();
    for key in shuffled_keys(1000) {
        map.insert(key, key);
    }

    assert_eq!(map.len(), 1000);
    for key in 0..1000 {
        assert!(map.contains_key(&key), "missing key {key}");
        assert_eq!(map.get(&key), Some(&key));
    }

    let keys: Vec<u64> = map.keys().copied().collect();
    assert_eq!(keys.len(), 1000);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    map.check_invariants().unwrap();
}

// ==============================================
// Seed scenario: two string entries
// ==============================================

#[test]
fn two_entry_map_iterates_in_key_order() {
    let mut map = SplayMap::new();
    map.insert("foo", "bar");
    map.insert("baz", "qux");

    let entries: Vec<(&&str, &&str)> = map.iter().collect();
    assert_eq!(entries, vec![(&"baz", &"qux"), (&"foo", &"bar")]);
    assert_eq!(map.first(), Some((&"baz", &"qux")));
    assert_eq!(map.last(), Some((&"foo", &"bar")));
}

// ==============================================
// Seed scenario: delete semantics
// ==============================================

#[test]
fn delete_semantics() {
    let mut map = SplayMap::new();
    map.insert("foo", "bar");

    assert_eq!(map.remove(&"foo"), Some("bar"));
    assert_eq!(map.get_or_default(&"foo", "none"), "none");
    assert_eq!(
        map.remove_or_else(&"baz", |key| if key.is_empty() { "?" } else { "computed" }),
        "computed"
    );
}

// ==============================================
// Operation laws
// ==============================================

#[test]
fn insert_then_delete_restores_the_entry_set() {
    let mut map: SplayMap<u64, u64> = shuffled_keys(200).map(|k| (k, k)).collect();
    let snapshot = map.clone();

    map.insert(5000, 1);
    map.insert(6000, 2);
    assert_ne!(map, snapshot);

    assert_eq!(map.remove(&5000), Some(1));
    assert_eq!(map.remove(&6000), Some(2));
    assert_eq!(map, snapshot);
}

#[test]
fn delete_then_get_is_absent_and_delete_absent_is_none() {
    let mut map: SplayMap<u64, u64> = (0..50).map(|k| (k, k)).collect();
    assert_eq!(map.remove(&25), Some(25));
    assert_eq!(map.get(&25), None);
    assert_eq!(map.remove(&25), None);
    assert_eq!(map.remove(&999), None);
    map.check_invariants().unwrap();
}

#[test]
fn iteration_changes_nothing() {
    let mut map: SplayMap<u64, u64> = shuffled_keys(500).map(|k| (k, k)).collect();
    // pin a known key at the root
    map.get(&123);
    assert_eq!(map.height_of(&123), Some(0));

    let height_before = map.height();
    let len_before = map.len();
    let _: Vec<_> = map.iter().collect();
    let _: Vec<_> = map.keys().collect();
    let _: Vec<_> = map.values().collect();

    assert_eq!(map.len(), len_before);
    assert_eq!(map.height(), height_before);
    assert_eq!(map.height_of(&123), Some(0), "iteration moved the root");
}

#[test]
fn obtain_never_moves_the_root_but_get_may() {
    let mut map: SplayMap<u64, u64> = shuffled_keys(500).map(|k| (k, k)).collect();
    map.get(&42);
    assert_eq!(map.height_of(&42), Some(0));

    // deep probe without splaying: root stays put
    let deep_key = (0..500u64)
        .max_by_key(|key| map.height_of(key).unwrap())
        .unwrap();
    assert_eq!(map.obtain(&deep_key), Some(&deep_key));
    assert_eq!(map.height_of(&42), Some(0));

    // the splaying read moves the probe to the root
    assert_eq!(map.get(&deep_key), Some(&deep_key));
    assert_eq!(map.height_of(&deep_key), Some(0));
}

#[test]
fn min_max_follow_mutations() {
    let mut map: SplayMap<i64, ()> = [(10, ()), (5, ()), (20, ())].into();
    assert_eq!(map.min_key(), Some(&5));
    assert_eq!(map.max_key(), Some(&20));

    map.remove(&5);
    assert_eq!(map.min_key(), Some(&10));
    map.insert(-3, ());
    assert_eq!(map.min_key(), Some(&-3));

    map.clear();
    assert_eq!(map.min_key(), None);
    assert_eq!(map.max_key(), None);
}

#[test]
fn merge_with_and_without_conflict_resolution() {
    let mut map: SplayMap<&str, i32> = [("a", 1), ("b", 2)].into();
    map.merge_from([("b", 20), ("c", 3)]);
    assert_eq!(map.get(&"b"), Some(&20));

    let mut map: SplayMap<&str, i32> = [("a", 1), ("b", 2)].into();
    map.merge_resolve([("b", 20), ("c", 3)], |_, old, new| *old + new);
    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"b"), Some(&22));
    assert_eq!(map.get(&"c"), Some(&3));
}

#[test]
fn repeated_access_keeps_entries_intact_under_heavy_splaying() {
    let mut map: SplayMap<u64, u64> = shuffled_keys(2000).map(|k| (k, k * 7)).collect();
    for round in 0..10u64 {
        for key in (round * 13..2000).step_by(97) {
            assert_eq!(map.get(&key), Some(&(key * 7)));
        }
        map.check_invariants().unwrap();
    }
    assert_eq!(map.len(), 2000);
}
