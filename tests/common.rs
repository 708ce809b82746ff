#![allow(dead_code)]

use symtab::{LookupMode, SymbolTable};

// Run the test on a table in each lookup mode.
pub fn with_table(mut test: impl FnMut(&dyn Fn(usize) -> SymbolTable)) {
    init_logger();

    // Full chain scan.
    test(
        &(|capacity| {
            SymbolTable::builder()
                .capacity(capacity)
                .lookup_mode(LookupMode::Chain)
                .build()
                .unwrap()
        }),
    );

    // Head of chain only.
    test(
        &(|capacity| {
            SymbolTable::builder()
                .capacity(capacity)
                .lookup_mode(LookupMode::HeadOnly)
                .build()
                .unwrap()
        }),
    );
}

// Installs a logger so `RUST_LOG=trace` shows table activity.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Returns `n` distinct keys that hash to the same bucket of `table`.
pub fn colliding_keys(table: &SymbolTable, n: usize) -> Vec<String> {
    let target = table.bucket_of("key0");
    (0..)
        .map(|i| format!("key{i}"))
        .filter(|key| table.bucket_of(key) == target)
        .take(n)
        .collect()
}

// Returns `n` distinct keys that each hash to a different bucket of `table`.
pub fn spread_keys(table: &SymbolTable, n: usize) -> Vec<String> {
    assert!(n <= table.capacity());
    let mut seen = vec![false; table.capacity()];
    (0..)
        .map(|i| format!("key{i}"))
        .filter(|key| !std::mem::replace(&mut seen[table.bucket_of(key)], true))
        .take(n)
        .collect()
}
