use std::collections::BTreeMap;

use rand::prelude::*;
use symtab::{LookupMode, Value};

mod common;
use common::with_table;

const ITERATIONS: usize = if cfg!(symtab_stress) { 256 } else { 16 };
const OPERATIONS: usize = if cfg!(symtab_stress) { 1 << 14 } else { 1 << 10 };

// Short keys over a small alphabet, so that duplicates are common.
fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(0..4);
    (0..len).map(|_| rng.gen_range(b'a'..=b'f') as char).collect()
}

#[test]
fn matches_btree_map() {
    with_table(|table| {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..ITERATIONS {
            let capacity = rng.gen_range(1..64);
            let mut table = table(capacity);
            let mut model = BTreeMap::new();

            for _ in 0..OPERATIONS {
                let key = random_key(&mut rng);

                if rng.gen_bool(0.7) {
                    let value = Value::Word(rng.gen());
                    let old = table.install(&key, value).unwrap();
                    assert_eq!(old, model.insert(key, value));
                } else {
                    let found = table.lookup(&key);
                    match table.lookup_mode() {
                        LookupMode::Chain => assert_eq!(found, model.get(&key).copied()),
                        // anything found at a chain head must be current
                        LookupMode::HeadOnly => {
                            if let Some(found) = found {
                                assert_eq!(Some(&found), model.get(&key));
                            }
                        }
                    }
                }
            }

            assert_eq!(table.len(), model.len());

            // the table holds exactly the model's pairs
            let mut pairs: Vec<_> = table
                .iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            assert!(model.into_iter().eq(pairs));

            table.delete();
        }
    });
}

#[test]
fn head_only_finds_singleton_chains() {
    with_table(|table| {
        let mut rng = StdRng::seed_from_u64(0xcafe);

        for _ in 0..ITERATIONS {
            let mut table = table(4096);
            let mut installed = Vec::new();

            for i in 0..64u64 {
                let key = format!("{:x}", rng.gen::<u64>());
                if table.chain_len(table.bucket_of(&key)) == 0 {
                    table.install(&key, Value::Word(i)).unwrap();
                    installed.push((key, i));
                }
            }

            for (key, i) in installed {
                assert_eq!(table.lookup(&key), Some(Value::Word(i)));
            }
        }
    });
}
