use probing_buckets::{
    DoubleHashProber, HashTable, HashTableError, LinearProber, Prober, StdHasher, StdKeyEq,
    StringHash, TableConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_key(rng: &mut StdRng, alphabet: &[u8]) -> String {
    let len: usize = rng.gen_range(1..6);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Runs random inserts and removes against `table` and a `HashMap` model and
/// checks that both agree after every step.
fn check_against_model<P>(mut table: HashTable<String, u32, P, StringHash>, seed: u64)
where
    P: Prober<String> + Clone,
{
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    let mut model: HashMap<String, u32> = HashMap::new();
    let alphabet: &[u8] = b"abcde01";
    let threshold: f64 = table.config().resize_threshold;

    for step in 0..3000u32 {
        let key: String = random_key(&mut rng, alphabet);
        if rng.gen_bool(0.7) {
            let capacity_before: usize = table.capacity();
            let lf_before: f64 = table.load_factor();
            table.insert(key.clone(), step).unwrap();
            model.insert(key.clone(), step);
            if table.capacity() != capacity_before {
                assert!(lf_before >= threshold);
                assert!(((table.len() - 1) as f64 / table.capacity() as f64) < threshold);
            }
        } else {
            assert_eq!(table.remove(&key), model.remove(&key).is_some());
        }
        assert_eq!(table.find(&key).map(|(_, v)| *v), model.get(&key).copied());
        assert_eq!(table.len(), model.len());
    }

    for (k, v) in model.iter() {
        assert_eq!(table.at(k), Ok(v));
    }
    assert_eq!(table.iter().count(), model.len());
}

#[test]
fn linear_table_agrees_with_hash_map() {
    init_logger();
    for seed in 0..4 {
        let table: HashTable<String, u32, LinearProber, StringHash> =
            HashTable::with_prober(LinearProber::new(), StringHash::new());
        check_against_model(table, seed);
    }
}

#[test]
fn double_hash_table_agrees_with_hash_map() {
    init_logger();
    for seed in 0..4 {
        let table: HashTable<String, u32, DoubleHashProber<StringHash>, StringHash> =
            HashTable::with_prober(
                DoubleHashProber::new(StringHash::with_seed(seed)),
                StringHash::new(),
            );
        check_against_model(table, seed);
    }
}

#[test]
fn randomized_hash_still_finds_every_key() {
    init_logger();
    let table: HashTable<String, u32, DoubleHashProber<StringHash>, StringHash> =
        HashTable::with_prober(
            DoubleHashProber::new(StringHash::randomized()),
            StringHash::randomized(),
        );
    check_against_model(table, 99);
}

#[test]
fn entries_survive_every_resize() {
    init_logger();
    let mut table: HashTable<u64, u64> = HashTable::new();
    let mut capacities: Vec<usize> = vec![table.capacity()];
    for i in 0..2000u64 {
        table.insert(i, i * i).unwrap();
        if *capacities.last().unwrap() != table.capacity() {
            capacities.push(table.capacity());
            for j in 0..=i {
                assert_eq!(table.at(&j), Ok(&(j * j)));
            }
        }
    }
    assert_eq!(
        capacities,
        vec![11, 23, 47, 97, 197, 397, 797, 1597, 3203, 6421]
    );
}

#[test]
fn keys_sharing_the_last_thirty_characters_collide_but_stay_distinct() {
    init_logger();
    let tail: &str = "abcdefghijklmnopqrstuvwxyz0123";
    let h: StringHash = StringHash::new();
    let keys: Vec<String> = (0..8).map(|i| format!("prefix{}{}", i, tail)).collect();
    assert!(keys.iter().all(|k| h.hash(k) == h.hash(tail)));

    let mut table: HashTable<String, usize, LinearProber, StringHash> =
        HashTable::with_prober(LinearProber::new(), StringHash::new());
    for (i, k) in keys.iter().enumerate() {
        table.insert(k.clone(), i).unwrap();
    }
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(table.at(k), Ok(&i));
    }
}

#[test]
fn table_at_last_allowed_capacity_reports_capacity_exhausted() {
    init_logger();
    let config: TableConfig = TableConfig::new().with_max_capacity(47);
    let mut table: HashTable<u32, u32> =
        HashTable::with_config(config, LinearProber::new(), StdHasher, StdKeyEq).unwrap();
    let mut i: u32 = 0;
    let err: HashTableError = loop {
        match table.insert(i, i) {
            Ok(()) => i += 1,
            Err(e) => break e,
        }
    };
    assert_eq!(err, HashTableError::CapacityExhausted { capacity: 47 });
    // 19 / 47 is the first load factor at or above 0.4
    assert_eq!(table.len(), 19);
    assert_eq!(table.find(&i), None);
}
