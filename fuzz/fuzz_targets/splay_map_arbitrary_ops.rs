#![no_main]

use libfuzzer_sys::fuzz_target;
use splaycache::tree::SplayMap;

// Fuzz arbitrary operation sequences on SplayMap
//
// Tests random sequences of insert, get, obtain, remove, prune, set_max_size,
// and iteration, validating the structural invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut map: SplayMap<u16, u16> = SplayMap::new();

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 8;
        let key = u16::from_le_bytes([data[idx + 1], data[idx + 2]]);

        match op {
            0 => {
                // insert
                map.insert(key, key);

                // the fresh key is reachable unless a zero bound ate it
                if map.max_size() != Some(0) {
                    assert_eq!(map.obtain(&key), Some(&key));
                }
            }
            1 => {
                // splaying get: a hit must leave the key at the root
                if map.get(&key).is_some() {
                    assert_eq!(map.height_of(&key), Some(0));
                }
            }
            2 => {
                // obtain (read-only)
                let _ = map.obtain(&key);
            }
            3 => {
                // remove
                let old_len = map.len();
                let removed = map.remove(&key);

                if removed.is_some() {
                    assert_eq!(map.len(), old_len - 1);
                    assert_eq!(map.obtain(&key), None);
                }
            }
            4 => {
                // prune
                let was_empty = map.is_empty();
                map.prune();
                assert_eq!(map.was_pruned(), !was_empty);
            }
            5 => {
                // set_max_size, sometimes clearing the bound
                let max = if key == 0 { None } else { Some(usize::from(key % 64)) };
                map.set_max_size(max);
                if let Some(max) = max {
                    assert!(map.len() <= max);
                }
            }
            6 => {
                // ordered iteration agrees with len and min/max
                let keys: Vec<u16> = map.keys().copied().collect();
                assert_eq!(keys.len(), map.len());
                assert!(keys.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(keys.first(), map.min_key());
                assert_eq!(keys.last(), map.max_key());
            }
            7 => {
                // clear
                map.clear();
                assert!(map.is_empty());
                assert!(!map.was_pruned());
            }
            _ => unreachable!(),
        }

        map.check_invariants().unwrap();
        idx += 3;
    }
});
