#![no_main]

use std::sync::{Arc, Mutex};

use libfuzzer_sys::fuzz_target;
use splaycache::builder::SplayMapBuilder;

// Fuzz bounded-eviction accounting
//
// Inserts a byte-derived key stream into a small bounded map and checks that
// the bound always holds and that the eviction callback accounts for every
// entry that ever left the map.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max = usize::from(data[0] % 32);
    let evicted: Arc<Mutex<Vec<u16>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);

    let mut map = SplayMapBuilder::new()
        .max_size(max)
        .on_evict(move |key: &u16, _value: &u16| {
            sink.lock().unwrap().push(*key);
        })
        .build();

    let mut inserted = 0usize;
    let mut removed_by_hand = 0usize;

    let mut idx = 1;
    while idx + 1 < data.len() {
        let key = u16::from_le_bytes([data[idx], data[idx + 1]]);

        if key % 5 == 4 {
            if map.remove(&key).is_some() {
                removed_by_hand += 1;
            }
        } else if map.insert(key, key).is_none() {
            inserted += 1;
        }

        assert!(map.len() <= max);
        map.check_invariants().unwrap();
        idx += 2;
    }

    // every stored entry ends up exactly one way: still present, evicted,
    // or removed explicitly
    let evicted = evicted.lock().unwrap();
    assert_eq!(map.len() + evicted.len() + removed_by_hand, inserted);
});
