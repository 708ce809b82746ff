#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use std::collections::HashMap as StdHashMap;
use symtab::{Error, LookupMode, SymbolTable, Value};

#[derive(Debug, Arbitrary)]
enum Operation {
    Install(String, u64),
    Lookup(String),
    Contains(String),
    Len,
    Iterate,
    Cursor,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    head_only: bool,
    operations: Vec<Operation>,
}

fn fuzz_table(input: FuzzInput) {
    let capacity = input.capacity as usize;
    let lookup_mode = if input.head_only {
        LookupMode::HeadOnly
    } else {
        LookupMode::Chain
    };

    let mut table = match SymbolTable::builder()
        .capacity(capacity)
        .lookup_mode(lookup_mode)
        .build()
    {
        Ok(table) => table,
        Err(err) => {
            assert_eq!(capacity, 0);
            assert_eq!(err, Error::InvalidCapacity(0));
            return;
        }
    };

    let mut std_map = StdHashMap::new();

    for op in input.operations {
        match op {
            Operation::Install(k, v) => {
                let std_result = std_map.insert(k.clone(), Value::Word(v));
                let table_result = table.install(&k, Value::Word(v)).unwrap();
                assert_eq!(std_result, table_result);
            }
            Operation::Lookup(k) => {
                let table_result = table.lookup(&k);
                match lookup_mode {
                    LookupMode::Chain => assert_eq!(std_map.get(&k).copied(), table_result),
                    LookupMode::HeadOnly => {
                        if table_result.is_some() {
                            assert_eq!(std_map.get(&k).copied(), table_result);
                        }
                    }
                }
            }
            Operation::Contains(k) => {
                if lookup_mode == LookupMode::Chain {
                    assert_eq!(std_map.contains_key(&k), table.contains_key(&k));
                }
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::Iterate => {
                let mut count = 0;
                for (k, v) in table.iter() {
                    assert_eq!(std_map.get(k), Some(&v));
                    count += 1;
                }
                assert_eq!(count, std_map.len());
            }
            Operation::Cursor => {
                let mut cursor = table.cursor();
                let mut count = 0;
                while let Some((k, v)) = cursor.next(&table).unwrap() {
                    assert_eq!(std_map.get(k), Some(&v));
                    count += 1;
                }
                assert_eq!(count, std_map.len());
            }
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz_table(input);
});
